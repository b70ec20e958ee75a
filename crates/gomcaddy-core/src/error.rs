//! # Error Types
//!
//! Domain-specific error types for gomcaddy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gomcaddy-core errors (this file)                                      │
//! │  ├── CoreError        - Cart / lifecycle / review rule violations      │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Persistence port failures (adapter-reported)   │
//! │                                                                         │
//! │  gomcaddy-api errors (separate crate)                                  │
//! │  └── ApiError         - Network / backend failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, status, field)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::lifecycle::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are raised before
/// any network call is made; callers translate them to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart has no lines, so there is nothing to snapshot or mutate.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart mutation referenced a line that is not in the cart.
    #[error("Item not in cart: {item_id}")]
    LineNotFound { item_id: String },

    /// A menu item was added under a restaurant it does not belong to.
    #[error("Menu item {item_id} does not belong to restaurant {restaurant_id}")]
    ForeignMenuItem {
        item_id: String,
        restaurant_id: String,
    },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// A status transition not permitted by the lifecycle table.
    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A transition was requested for an order already in a terminal state.
    #[error("Order is {status} and can no longer change")]
    TerminalOrder { status: OrderStatus },

    /// A review was attempted on an order that has not been delivered.
    #[error("Only delivered orders can be reviewed (order is {status})")]
    ReviewNotAllowed { status: OrderStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cart persistence failed (wraps the port error).
    #[error("Cart persistence failed: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation so that bad input is never sent over the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors reported by a cart persistence adapter.
///
/// The port is storage-agnostic, so variants carry adapter messages as
/// strings rather than concrete I/O error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted record could not be read.
    #[error("Failed to read persisted cart: {0}")]
    Read(String),

    /// The record could not be written.
    #[error("Failed to write persisted cart: {0}")]
    Write(String),

    /// The record was read but is not a valid cart.
    /// Restoration treats this as "no saved cart" rather than crashing.
    #[error("Persisted cart is corrupt: {0}")]
    Corrupt(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
