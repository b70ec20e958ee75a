//! # API Error Types
//!
//! Error taxonomy for everything that can go wrong between the client
//! and the order/payment backend.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Pre-network    │  │   Auth          │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Invalid        │  │  Unauthorized   │  │  NotFound               │ │
//! │  │  MissingReference│ │  (401/403)      │  │  Server {status}        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   Payment       │  │   Transport     │                              │
//! │  │                 │  │                 │                              │
//! │  │  PaymentFailed  │  │  reqwest errors │                              │
//! │  │  (contact       │  │  (retryable)    │                              │
//! │  │   support)      │  │                 │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pre-network errors are raised without a single request being sent;
//! `Unauthorized` means "must log in" (and forces a logout on the
//! operator surface); `NotFound` renders as an empty state, not a crash.

use thiserror::Error;

use gomcaddy_core::CoreError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the backend gateway and the flows built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the credentials (401/403).
    #[error("You must be logged in to do that")]
    Unauthorized,

    /// The requested resource does not exist (404).
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// A business rule or input check failed before any network call.
    #[error("{0}")]
    Invalid(#[from] CoreError),

    /// The payment provider redirected back without a reference.
    /// Reported immediately; no verification request is made.
    #[error("Payment reference missing from callback")]
    MissingReference,

    /// The provider reported a non-success verification result.
    /// Requires manual support contact; never retried automatically.
    #[error("Payment verification failed: {detail}")]
    PaymentFailed { detail: String },

    /// The backend answered with an unexpected status code.
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// The request never completed (DNS, connect, timeout, bad body).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the failure means the user has no valid identity.
    ///
    /// Callers route this to the login screen; the operator dashboard
    /// additionally drops its stored credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// True when retrying the same request may succeed.
    ///
    /// ## Retryable
    /// - Transport failures (network blips, timeouts)
    /// - 5xx server responses
    ///
    /// ## Never Retryable
    /// - Payment verification failures (financial correctness over
    ///   convenience; an explicit user retry is required)
    /// - Validation and auth errors
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
