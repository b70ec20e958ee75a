//! # Order Lifecycle
//!
//! The canonical order status progression, shared between the customer
//! tracking view and the operator dashboard.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle States                             │
//! │                                                                         │
//! │  pending ──► confirmed ──► preparing ──► ready ──► picked_up ──►       │
//! │                                                        delivered        │
//! │     │            │             │           │              │             │
//! │     └────────────┴─────────────┴───────────┴──────────────┘             │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                          cancelled                                      │
//! │                                                                         │
//! │  • pending is the unique initial state (set before payment clears)     │
//! │  • cancelled is reachable from any non-terminal state                  │
//! │  • delivered and cancelled are terminal: no transitions out            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are validated against an explicit table rather than string
//! comparisons; the server applies the same rules authoritatively, the
//! client uses them to reject doomed requests before the network.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order within its delivery lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, payment not yet confirmed.
    Pending,
    /// Payment confirmed, restaurant notified.
    Confirmed,
    /// Kitchen is preparing the order.
    Preparing,
    /// Ready for rider pickup.
    Ready,
    /// Rider is on the way.
    PickedUp,
    /// Terminal success state. Unlocks the review gate.
    Delivered,
    /// Terminal cancellation branch.
    Cancelled,
}

/// The success path in strict linear order.
///
/// `progress_index` is the position within this list; `Cancelled` is not
/// in it and is rendered outside the progress tracker.
pub const SUCCESS_PATH: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::PickedUp,
    OrderStatus::Delivered,
];

/// Every reachable status, in display order (operator status select).
pub const ALL_STATUSES: [OrderStatus; 7] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::PickedUp,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

impl OrderStatus {
    /// Returns the states this status may legally transition to.
    ///
    /// The success path advances one step at a time; `Cancelled` is
    /// reachable from every non-terminal state; terminal states have no
    /// successors.
    pub const fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::PickedUp, OrderStatus::Cancelled],
            OrderStatus::PickedUp => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Checks whether `self → to` appears in the transition table.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        self.successors().contains(&to)
    }

    /// Validates a transition request, returning the new status.
    ///
    /// ## Errors
    /// - `TerminalOrder` when the order is already `Delivered`/`Cancelled`
    /// - `InvalidTransition` for any move not in the table
    pub fn transition(self, to: OrderStatus) -> CoreResult<OrderStatus> {
        if self.is_terminal() {
            return Err(CoreError::TerminalOrder { status: self });
        }
        if !self.can_transition(to) {
            return Err(CoreError::InvalidTransition { from: self, to });
        }
        Ok(to)
    }

    /// Position of this status within the six-state success path.
    ///
    /// Defined (and non-negative) iff the status is on the success path;
    /// `Cancelled` returns `None`.
    pub fn progress_index(self) -> Option<usize> {
        SUCCESS_PATH.iter().position(|s| *s == self)
    }

    /// True for states with no outgoing transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// True iff the order ended on the cancellation branch.
    pub const fn is_cancelled(self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// The wire name, as the backend serializes it.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for tracking and dashboard views.
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending Payment",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready for Pickup",
            OrderStatus::PickedUp => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for OrderStatus {
    /// `Pending` is the unique initial state, set at order creation
    /// before payment is confirmed.
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment reconciliation state of an order.
///
/// Transitions `Unpaid → Paid` exactly once, as a side effect of a
/// successful payment verification. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No successful verification has been reconciled yet.
    Unpaid,
    /// A payment reference verified successfully.
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
