//! # Checkout Flow
//!
//! Converts the cart into an order and hands the user off to the
//! payment provider.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Sequence                                │
//! │                                                                         │
//! │  1. validate address / snapshot cart     (no network; cart intact)     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. POST /orders                         order exists pending/unpaid   │
//! │         │  failure → nothing created, cart intact                      │
//! │         ▼                                                               │
//! │  3. POST /payment/initialize             authorization_url received    │
//! │         │  failure → order stays pending/unpaid, cart MUST stay        │
//! │         │            intact so the user can retry                      │
//! │         ▼                                                               │
//! │  4. clear cart, redirect to provider     ← point of no return          │
//! │                                                                         │
//! │  The cart is cleared strictly AFTER payment initialization succeeds;   │
//! │  clearing earlier would silently lose the basket on a provider        │
//! │  outage. This ordering is load-bearing - do not reorder.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use gomcaddy_core::{CartSession, DeliveryAddress, OrderRequest};

use crate::error::ApiResult;
use crate::gateway::OrderGateway;

/// Where to send the user after a successful checkout submission.
#[derive(Debug, Clone)]
pub struct CheckoutRedirect {
    /// The created order, already persisted server-side.
    pub order_id: String,

    /// The provider page that collects the payment.
    pub authorization_url: String,
}

/// Checkout orchestration over an [`OrderGateway`].
pub struct CheckoutFlow<G> {
    gateway: G,
}

impl<G: OrderGateway> CheckoutFlow<G> {
    pub fn new(gateway: G) -> Self {
        CheckoutFlow { gateway }
    }

    /// Access to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Submits the cart as an order and initializes payment.
    ///
    /// On success the cart has been cleared and the caller redirects to
    /// `authorization_url`. On any failure the cart is left exactly as
    /// it was.
    pub async fn checkout(
        &self,
        session: &mut CartSession,
        address: DeliveryAddress,
        notes: Option<String>,
        callback_url: &str,
    ) -> ApiResult<CheckoutRedirect> {
        // Validation and snapshotting happen before any request is sent.
        let request = OrderRequest::from_cart(session.cart(), address, notes)?;

        let order = self.gateway.create_order(&request).await?;

        let init = match self
            .gateway
            .initialize_payment(&order.id, callback_url)
            .await
        {
            Ok(init) => init,
            Err(e) => {
                // The order exists pending/unpaid; the cart stays intact
                // so the user can retry from the checkout page.
                warn!(order_id = %order.id, error = %e, "payment initialization failed");
                return Err(e);
            }
        };

        session.clear()?;
        info!(
            order_id = %order.id,
            total = order.total,
            "checkout submitted, redirecting to payment"
        );

        Ok(CheckoutRedirect {
            order_id: order.id,
            authorization_url: init.authorization_url,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
