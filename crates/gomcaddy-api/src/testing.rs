//! # In-Process Fake Backend
//!
//! A [`FakeGateway`] implementing [`OrderGateway`] against in-memory
//! state, mirroring the backend's observable behavior: order creation,
//! payment initialization/verification (including idempotent
//! re-verification), table-checked status transitions, and the
//! one-review-per-order constraint.
//!
//! Used by this crate's own flow tests; exported so glue layers can
//! exercise their screens without a network.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use gomcaddy_core::{
    Order, OrderRequest, OrderStatus, PaymentStatus, Review, ReviewRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::gateway::{OrderGateway, PaymentInit, PaymentVerification};

#[derive(Default)]
struct FakeState {
    orders: BTreeMap<String, Order>,
    reviews: Vec<ReviewRequest>,
    next_id: u32,
    fail_create: bool,
    fail_initialize: bool,
    verify_status: Option<String>,
    calls: Vec<&'static str>,
}

/// Order/payment backend running in process.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Self {
        FakeGateway::default()
    }

    /// Makes `create_order` fail with a 500 until further notice.
    pub fn fail_create_orders(&self) {
        self.state.lock().unwrap().fail_create = true;
    }

    /// Makes `initialize_payment` fail with a 502 until further notice.
    pub fn fail_payment_initialization(&self) {
        self.state.lock().unwrap().fail_initialize = true;
    }

    /// Sets the status the payment provider will report on verification.
    /// Defaults to `"success"`.
    pub fn set_verify_status(&self, status: &str) {
        self.state.lock().unwrap().verify_status = Some(status.to_string());
    }

    /// Seeds an existing order (for watcher/operator tests).
    pub fn insert_order(&self, order: Order) {
        self.state.lock().unwrap().orders.insert(order.id.clone(), order);
    }

    /// Mutates a seeded order's lifecycle fields, simulating server-side
    /// progress between polls.
    pub fn advance_order(&self, order_id: &str, status: OrderStatus, payment: PaymentStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(order) = state.orders.get_mut(order_id) {
            order.status = status;
            order.payment_status = payment;
            order.updated_at = Utc::now();
        }
    }

    /// A copy of the stored order, if it exists.
    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.state.lock().unwrap().orders.get(order_id).cloned()
    }

    /// Gateway methods invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    /// How many times the named gateway method was invoked.
    pub fn call_count(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == method)
            .count()
    }
}

#[async_trait]
impl OrderGateway for FakeGateway {
    async fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_order");

        if state.fail_create {
            return Err(ApiError::Server {
                status: 500,
                detail: "order store unavailable".to_string(),
            });
        }

        state.next_id += 1;
        let now = Utc::now();
        let order = Order {
            id: format!("ord-{}", state.next_id),
            user_id: "user-1".to_string(),
            user_name: "Test User".to_string(),
            restaurant_id: request.restaurant_id.clone(),
            restaurant_name: format!("Restaurant {}", request.restaurant_id),
            items: request.items.clone(),
            total: request.total().kobo(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_reference: None,
            delivery_address: request.delivery_address.clone(),
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        state.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn initialize_payment(
        &self,
        order_id: &str,
        callback_url: &str,
    ) -> ApiResult<PaymentInit> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("initialize_payment");

        if state.fail_initialize {
            return Err(ApiError::Server {
                status: 502,
                detail: "payment provider unreachable".to_string(),
            });
        }

        let order = state
            .orders
            .get_mut(order_id)
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        let reference = format!("ref-{}", order_id);
        order.payment_reference = Some(reference.clone());

        Ok(PaymentInit {
            authorization_url: format!(
                "https://pay.example/authorize/{}?redirect={}",
                reference, callback_url
            ),
            reference: Some(reference),
        })
    }

    async fn verify_payment(&self, reference: &str) -> ApiResult<PaymentVerification> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("verify_payment");

        let status = state
            .verify_status
            .clone()
            .unwrap_or_else(|| "success".to_string());

        if status == "success" {
            // Reconcile: advance pending/unpaid to confirmed/paid. An
            // already-confirmed reference is left untouched (idempotent).
            if let Some(order) = state
                .orders
                .values_mut()
                .find(|o| o.payment_reference.as_deref() == Some(reference))
            {
                if order.status == OrderStatus::Pending {
                    order.status = OrderStatus::Confirmed;
                    order.payment_status = PaymentStatus::Paid;
                    order.updated_at = Utc::now();
                }
            }
        }

        Ok(PaymentVerification { status })
    }

    async fn fetch_order(&self, order_id: &str) -> ApiResult<Order> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("fetch_order");
        state
            .orders
            .get(order_id)
            .cloned()
            .ok_or(ApiError::NotFound { resource: "Order" })
    }

    async fn fetch_orders(&self) -> ApiResult<Vec<Order>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("fetch_orders");
        let mut orders: Vec<Order> = state.orders.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn fetch_all_orders(&self, status: Option<OrderStatus>) -> ApiResult<Vec<Order>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("fetch_all_orders");
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<Order> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_order_status");

        let order = state
            .orders
            .get_mut(order_id)
            .ok_or(ApiError::NotFound { resource: "Order" })?;

        // The server validates with the same transition table.
        let next = order
            .status
            .transition(status)
            .map_err(|e| ApiError::Server {
                status: 400,
                detail: e.to_string(),
            })?;

        order.status = next;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    async fn submit_review(&self, request: &ReviewRequest) -> ApiResult<Review> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("submit_review");

        // Uniqueness lives here, not in the client.
        if state.reviews.iter().any(|r| r.order_id == request.order_id) {
            return Err(ApiError::Server {
                status: 400,
                detail: "Order already reviewed".to_string(),
            });
        }

        state.reviews.push(request.clone());
        Ok(Review {
            id: format!("rev-{}", state.reviews.len()),
            user_id: "user-1".to_string(),
            user_name: "Test User".to_string(),
            restaurant_id: request.restaurant_id.clone(),
            order_id: request.order_id.clone(),
            rating: request.rating,
            comment: request.comment.clone(),
            created_at: Utc::now(),
        })
    }
}
