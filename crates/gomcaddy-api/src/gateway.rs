//! # Backend Gateway
//!
//! Typed access to the order/payment backend.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST  /orders                      create order from a cart snapshot  │
//! │  GET   /orders                      the caller's orders                 │
//! │  GET   /orders/{id}                 one order                           │
//! │  PATCH /orders/{id}/status          operator transition                 │
//! │  GET   /admin/orders[?status=..]    operator order list                 │
//! │  POST  /payment/initialize          start a provider checkout           │
//! │  GET   /payment/verify/{reference}  reconcile a provider redirect       │
//! │  POST  /reviews                     attach a review to an order         │
//! │  GET   /restaurants[?search&cuisine]                                    │
//! │  GET   /restaurants/{id}/menu                                           │
//! │  GET   /restaurants/{id}/reviews                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order/payment/review operations live behind the [`OrderGateway`]
//! trait so the flows built on top (checkout, reconciliation, polling)
//! can be exercised against an in-process fake. Browse endpoints are
//! plain methods on [`HttpGateway`]; nothing downstream branches on
//! them.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gomcaddy_core::{
    MenuItem, Order, OrderRequest, OrderStatus, Restaurant, Review, ReviewRequest,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Payment DTOs
// =============================================================================

/// Response of `POST /payment/initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInit {
    /// Where to send the user to authorize the payment.
    pub authorization_url: String,

    /// Provider reference assigned to this attempt, when known upfront.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Response of `GET /payment/verify/{reference}`.
///
/// Anything other than `"success"` is a failure; the provider's exact
/// failure vocabulary is not modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub status: String,
}

impl PaymentVerification {
    /// True iff the provider confirmed the charge.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Serialize)]
struct InitializePaymentBody<'a> {
    order_id: &'a str,
    callback_url: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusUpdateBody {
    status: OrderStatus,
}

/// Backend error payload (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// The order, payment, and review operations the flows are built on.
///
/// [`HttpGateway`] is the production implementation; tests use the fake
/// in [`crate::testing`].
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// `POST /orders` - creates a `pending`/`unpaid` order.
    async fn create_order(&self, request: &OrderRequest) -> ApiResult<Order>;

    /// `POST /payment/initialize` - returns the authorization redirect.
    async fn initialize_payment(
        &self,
        order_id: &str,
        callback_url: &str,
    ) -> ApiResult<PaymentInit>;

    /// `GET /payment/verify/{reference}` - reconciles a provider result.
    async fn verify_payment(&self, reference: &str) -> ApiResult<PaymentVerification>;

    /// `GET /orders/{id}`.
    async fn fetch_order(&self, order_id: &str) -> ApiResult<Order>;

    /// `GET /orders` - the calling user's orders, newest first.
    async fn fetch_orders(&self) -> ApiResult<Vec<Order>>;

    /// `GET /admin/orders` - every order, optionally filtered by status.
    async fn fetch_all_orders(&self, status: Option<OrderStatus>) -> ApiResult<Vec<Order>>;

    /// `PATCH /orders/{id}/status` - operator transition request.
    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<Order>;

    /// `POST /reviews`.
    async fn submit_review(&self, request: &ReviewRequest) -> ApiResult<Review>;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

/// `OrderGateway` over HTTP with bearer-token auth.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    /// Builds a gateway from the client configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(HttpGateway {
            http,
            base_url: config.trimmed_base_url().to_string(),
            token: None,
        })
    }

    /// Attaches the bearer token of an authenticated identity.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces (or clears, on logout) the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, join_url(&self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &'static str,
    ) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for(status, response.text().await.ok(), resource));
        }
        Ok(response.json::<T>().await?)
    }

    // -------------------------------------------------------------------------
    // Browse endpoints (no seam needed)
    // -------------------------------------------------------------------------

    /// `GET /restaurants`, optionally filtered.
    pub async fn fetch_restaurants(
        &self,
        search: Option<&str>,
        cuisine: Option<&str>,
    ) -> ApiResult<Vec<Restaurant>> {
        debug!(?search, ?cuisine, "fetch_restaurants");
        let mut builder = self.request(Method::GET, "/restaurants");
        if let Some(search) = search {
            builder = builder.query(&[("search", search)]);
        }
        if let Some(cuisine) = cuisine {
            builder = builder.query(&[("cuisine", cuisine)]);
        }
        self.read_json(builder, "Restaurants").await
    }

    /// `GET /restaurants/{id}` - one restaurant.
    pub async fn fetch_restaurant(&self, restaurant_id: &str) -> ApiResult<Restaurant> {
        debug!(restaurant_id = %restaurant_id, "fetch_restaurant");
        let builder = self.request(Method::GET, &format!("/restaurants/{}", restaurant_id));
        self.read_json(builder, "Restaurant").await
    }

    /// `GET /restaurants/{id}/menu`.
    pub async fn fetch_menu(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>> {
        debug!(restaurant_id = %restaurant_id, "fetch_menu");
        let builder = self.request(Method::GET, &format!("/restaurants/{}/menu", restaurant_id));
        self.read_json(builder, "Menu").await
    }

    /// `GET /restaurants/{id}/reviews`, newest first.
    pub async fn fetch_reviews(&self, restaurant_id: &str) -> ApiResult<Vec<Review>> {
        debug!(restaurant_id = %restaurant_id, "fetch_reviews");
        let builder = self.request(
            Method::GET,
            &format!("/restaurants/{}/reviews", restaurant_id),
        );
        self.read_json(builder, "Reviews").await
    }
}

#[async_trait]
impl OrderGateway for HttpGateway {
    async fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        debug!(restaurant_id = %request.restaurant_id, items = request.items.len(), "create_order");
        let builder = self.request(Method::POST, "/orders").json(request);
        let order: Order = self.read_json(builder, "Order").await?;
        info!(order_id = %order.id, total = order.total, "order created");
        Ok(order)
    }

    async fn initialize_payment(
        &self,
        order_id: &str,
        callback_url: &str,
    ) -> ApiResult<PaymentInit> {
        debug!(order_id = %order_id, "initialize_payment");
        let body = InitializePaymentBody {
            order_id,
            callback_url,
        };
        let builder = self.request(Method::POST, "/payment/initialize").json(&body);
        self.read_json(builder, "Order").await
    }

    async fn verify_payment(&self, reference: &str) -> ApiResult<PaymentVerification> {
        debug!(reference = %reference, "verify_payment");
        let builder = self.request(Method::GET, &format!("/payment/verify/{}", reference));
        self.read_json(builder, "Payment").await
    }

    async fn fetch_order(&self, order_id: &str) -> ApiResult<Order> {
        debug!(order_id = %order_id, "fetch_order");
        let builder = self.request(Method::GET, &format!("/orders/{}", order_id));
        self.read_json(builder, "Order").await
    }

    async fn fetch_orders(&self) -> ApiResult<Vec<Order>> {
        debug!("fetch_orders");
        let builder = self.request(Method::GET, "/orders");
        self.read_json(builder, "Orders").await
    }

    async fn fetch_all_orders(&self, status: Option<OrderStatus>) -> ApiResult<Vec<Order>> {
        debug!(?status, "fetch_all_orders");
        let mut builder = self.request(Method::GET, "/admin/orders");
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        self.read_json(builder, "Orders").await
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<Order> {
        debug!(order_id = %order_id, status = %status, "update_order_status");
        let builder = self
            .request(Method::PATCH, &format!("/orders/{}/status", order_id))
            .json(&StatusUpdateBody { status });
        self.read_json(builder, "Order").await
    }

    async fn submit_review(&self, request: &ReviewRequest) -> ApiResult<Review> {
        debug!(order_id = %request.order_id, rating = request.rating, "submit_review");
        let builder = self.request(Method::POST, "/reviews").json(request);
        self.read_json(builder, "Order").await
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

/// Maps a non-success response to the error taxonomy.
fn error_for(status: StatusCode, body: Option<String>, resource: &'static str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound { resource },
        _ => {
            let raw = body.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&raw)
                .map(|b| b.detail)
                .unwrap_or(raw);
            ApiError::Server {
                status: status.as_u16(),
                detail,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000/api", "/orders"),
            "http://localhost:8000/api/orders"
        );
    }

    #[test]
    fn test_verification_success_detection() {
        let ok = PaymentVerification {
            status: "success".to_string(),
        };
        assert!(ok.is_success());

        let failed = PaymentVerification {
            status: "failed".to_string(),
        };
        assert!(!failed.is_success());
    }

    #[test]
    fn test_payment_init_tolerates_missing_reference() {
        let init: PaymentInit =
            serde_json::from_str(r#"{"authorization_url": "https://pay.example/x"}"#).unwrap();
        assert_eq!(init.reference, None);
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            error_for(StatusCode::UNAUTHORIZED, None, "Order"),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            error_for(StatusCode::FORBIDDEN, None, "Order"),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            error_for(StatusCode::NOT_FOUND, None, "Order"),
            ApiError::NotFound { resource: "Order" }
        ));

        let err = error_for(
            StatusCode::BAD_REQUEST,
            Some(r#"{"detail": "Can only review delivered orders"}"#.to_string()),
            "Order",
        );
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Can only review delivered orders");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_update_body_wire_shape() {
        let body = StatusUpdateBody {
            status: OrderStatus::PickedUp,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"picked_up"}"#
        );
    }
}
