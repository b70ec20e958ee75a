//! # gomcaddy-api: Backend Gateway and Flows
//!
//! Everything that talks to the order/payment backend lives here:
//! the typed HTTP gateway, the checkout flow, payment callback
//! reconciliation, the polling watcher, and operator status updates.
//!
//! ## Flow Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ordering, End to End                              │
//! │                                                                         │
//! │  CartSession ──► CheckoutFlow::checkout ──► pending/unpaid Order       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │            redirect to authorization_url (provider)                    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  PaymentCallback::verify ──► Order becomes confirmed/paid              │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  watch_order / watch_orders ──► lifecycle observed by polling          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  submit_review (once the order is delivered)                           │
//! │                                                                         │
//! │  operator::update_status drives the lifecycle from the dashboard.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod callback;
pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod operator;
pub mod poll;
pub mod review;
pub mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use callback::{payment_reference, PaymentCallback};
pub use checkout::{CheckoutFlow, CheckoutRedirect};
pub use config::{ClientConfig, ORDER_DETAIL_POLL, ORDER_LIST_POLL};
pub use error::{ApiError, ApiResult};
pub use gateway::{HttpGateway, OrderGateway, PaymentInit, PaymentVerification};
pub use poll::{watch_all_orders, watch_order, watch_orders, PollHandle, Poller, StaleGuard};
pub use review::submit_review;
