//! # Payment Callback Reconciliation
//!
//! The provider sends the user back to the callback URL carrying a
//! payment reference. This module extracts the reference and reconciles
//! it with the order exactly once per callback visit.
//!
//! ## Rules
//! - `reference` and `trxref` query parameters are both accepted;
//!   `reference` wins when both are present.
//! - No reference at all is a client-side input error, reported without
//!   a single network call.
//! - Verification is consumed on use: re-running it requires parsing
//!   the callback again, which mirrors a fresh page visit.
//! - A `success` result means the order is now `confirmed`/`paid`;
//!   verifying an already-confirmed reference succeeds as a no-op.
//! - Any other result requires manual support contact. There is no
//!   automatic retry; the order-list poll converges on server truth.

use tracing::{info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::gateway::OrderGateway;

/// Extracts the payment reference from a callback URL.
///
/// Prefers `reference`, falls back to `trxref`.
pub fn payment_reference(url: &Url) -> Option<String> {
    let mut trxref = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "reference" if !value.is_empty() => return Some(value.into_owned()),
            "trxref" if !value.is_empty() && trxref.is_none() => {
                trxref = Some(value.into_owned());
            }
            _ => {}
        }
    }
    trxref
}

/// A parsed provider callback, ready to verify once.
#[derive(Debug)]
pub struct PaymentCallback {
    reference: String,
}

impl PaymentCallback {
    /// Parses the callback URL the provider redirected to.
    ///
    /// ## Errors
    /// `MissingReference` when neither query parameter is present -
    /// reported immediately, zero network calls made.
    pub fn from_url(url: &Url) -> ApiResult<Self> {
        match payment_reference(url) {
            Some(reference) => Ok(PaymentCallback { reference }),
            None => Err(ApiError::MissingReference),
        }
    }

    /// The extracted provider reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Verifies the payment with the backend.
    ///
    /// Consumes the callback so each visit verifies exactly once.
    ///
    /// ## Errors
    /// `PaymentFailed` for any provider result other than `success`;
    /// transport errors pass through. Neither is retried automatically.
    pub async fn verify<G: OrderGateway>(self, gateway: &G) -> ApiResult<()> {
        let verification = gateway.verify_payment(&self.reference).await?;

        if verification.is_success() {
            info!(reference = %self.reference, "payment verified");
            Ok(())
        } else {
            warn!(
                reference = %self.reference,
                status = %verification.status,
                "payment verification failed"
            );
            Err(ApiError::PaymentFailed {
                detail: verification.status,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
