//! # Domain Types
//!
//! Core domain types shared across the client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Restaurant    │   │    MenuItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  restaurant_id  │   │  status         │       │
//! │  │  cuisine_type   │   │  price (kobo)   │   │  payment_status │       │
//! │  │  rating         │   │  available      │   │  total (kobo)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  OrderRequest is the immutable snapshot a cart becomes at checkout;    │
//! │  Order is the server-owned record the client only observes.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are the wire names (snake_case JSON), so these types
//! double as the request/response payloads of the backend contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::lifecycle::{OrderStatus, PaymentStatus};
use crate::money::Money;
use crate::validation::{validate_address, validate_notes};

// =============================================================================
// Restaurant & Menu
// =============================================================================

/// A restaurant on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown on listing cards.
    pub description: String,

    /// Cuisine category used for filtering.
    pub cuisine_type: String,

    /// Average review rating, 0.0-5.0, one decimal.
    pub rating: f64,

    /// Cover image URL.
    pub image: String,

    /// Human-readable delivery estimate, e.g. "30-45 mins".
    pub delivery_time: String,

    /// Minimum order value in kobo.
    pub min_order: i64,

    /// Whether the restaurant currently accepts orders.
    pub is_open: bool,
}

impl Restaurant {
    /// Returns the minimum order value as Money.
    #[inline]
    pub fn min_order(&self) -> Money {
        Money::from_kobo(self.min_order)
    }
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning restaurant.
    pub restaurant_id: String,

    /// Display name shown on menu cards and order lines.
    pub name: String,

    /// Description shown on the menu card.
    pub description: String,

    /// Price in kobo.
    pub price: i64,

    /// Menu section, e.g. "Main Course".
    pub category: String,

    /// Image URL.
    pub image: String,

    /// Whether the item can currently be ordered.
    pub available: bool,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_kobo(self.price)
    }
}

// =============================================================================
// Delivery Address
// =============================================================================

/// Where an order is delivered. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub phone: String,
}

// =============================================================================
// Order Lines
// =============================================================================

/// A line of an order, frozen at checkout time.
///
/// This is the wire shape of `items[]` in order payloads; the cart's
/// image reference is display-only and does not travel with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item this line was created from.
    pub menu_item_id: String,

    /// Item name at the time of ordering (frozen).
    pub name: String,

    /// Unit price in kobo at the time of ordering (frozen).
    pub price: i64,

    /// Quantity ordered.
    pub quantity: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_kobo(self.price)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_kobo(self.price * self.quantity)
    }
}

// =============================================================================
// Order Request (checkout snapshot)
// =============================================================================

/// The immutable snapshot a cart becomes at checkout submission.
///
/// Built exactly once per checkout; the cart itself is cleared only
/// after the order exists server-side and payment initialization has
/// succeeded, never before.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub restaurant_id: String,
    pub items: Vec<OrderLine>,
    pub delivery_address: DeliveryAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderRequest {
    /// Snapshots the cart into an order request.
    ///
    /// ## Errors
    /// - `EmptyCart` if the cart holds no lines
    /// - `Validation` for a missing address field or oversized notes
    ///
    /// All failures happen before any network call, leaving the cart
    /// untouched.
    pub fn from_cart(
        cart: &Cart,
        address: DeliveryAddress,
        notes: Option<String>,
    ) -> CoreResult<Self> {
        let restaurant_id = match cart.restaurant_id() {
            Some(id) if !cart.is_empty() => id.to_string(),
            _ => return Err(CoreError::EmptyCart),
        };

        validate_address(&address)?;
        validate_notes(notes.as_deref())?;

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(OrderRequest {
            restaurant_id,
            items: cart.lines().iter().map(|l| l.to_order_line()).collect(),
            delivery_address: address,
            notes,
        })
    }

    /// Sum of line totals, recomputed from the lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(|l| l.line_total()).sum()
    }
}

// =============================================================================
// Order (server-owned record)
// =============================================================================

/// A placed order.
///
/// The server owns this record; the client observes it via polling and
/// mutates it only through status-transition and payment-verification
/// operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<OrderLine>,

    /// Order total in kobo, computed server-side from the lines.
    pub total: i64,

    pub status: OrderStatus,
    pub payment_status: PaymentStatus,

    /// Reference assigned at payment initialization, if any.
    #[serde(default)]
    pub payment_reference: Option<String>,

    pub delivery_address: DeliveryAddress,
    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_kobo(self.total)
    }

    /// Position within the six-state success path, `None` if cancelled.
    #[inline]
    pub fn progress_index(&self) -> Option<usize> {
        self.status.progress_index()
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// A submitted review, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub restaurant_id: String,
    pub order_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a review. Built through the review gate
/// (`ReviewRequest::for_order`), never by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub restaurant_id: String,
    pub order_id: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated identity the client consumes.
///
/// Token issuance and storage live elsewhere; the core only needs to
/// know who is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
