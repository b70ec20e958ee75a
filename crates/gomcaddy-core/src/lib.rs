//! # gomcaddy-core: Pure Business Logic for the Gomcaddy Client
//!
//! This crate is the **heart** of the Gomcaddy food-ordering client. It
//! contains all business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gomcaddy Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       UI / Glue Layer                           │   │
//! │  │   Menu pages ──► Cart view ──► Checkout ──► Order tracking     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gomcaddy-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ lifecycle │  │   money   │  │  review   │  │   │
//! │  │   │   Cart    │  │OrderStatus│  │   Money   │  │   gate    │  │   │
//! │  │   │ CartLine  │  │ PaymentSt │  │  (kobo)   │  │  rating   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │        ┌───────────────────────┴──────────────────┐                    │
//! │        ▼                                          ▼                     │
//! │  ┌──────────────────┐                  ┌──────────────────────┐        │
//! │  │  gomcaddy-store  │                  │    gomcaddy-api      │        │
//! │  │  cart record on  │                  │  backend gateway,    │        │
//! │  │  disk (CartStore)│                  │  checkout, polling   │        │
//! │  └──────────────────┘                  └──────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart engine, persistence port, cart session
//! - [`lifecycle`] - Order status state machine and transition table
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`review`] - Review gate (delivered orders only, rating 1-5)
//! - [`types`] - Domain/wire types (Restaurant, MenuItem, Order, ...)
//! - [`validation`] - Input validation, run before any network call
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod review;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gomcaddy_core::Money` instead of
// `use gomcaddy_core::money::Money`

pub use cart::{AddOutcome, Cart, CartLine, CartSession, CartStore, ConflictDecision,
               MemoryStore, PersistedCart};
pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use lifecycle::{OrderStatus, PaymentStatus, ALL_STATUSES, SUCCESS_PATH};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts; a single delivery order larger than this is
/// not something a kitchen will fulfil anyway.
pub const MAX_CART_LINES: usize = 50;

/// Maximum quantity of a single line.
///
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 99;
