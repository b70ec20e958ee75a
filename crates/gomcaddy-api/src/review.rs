//! # Review Submission
//!
//! Thin flow over the review gate: build the payload through
//! `ReviewRequest::for_order` (delivered-only, rating 1-5) and post it.
//! Uniqueness is enforced by the backend; a duplicate rejection comes
//! back as an ordinary `Server` error.

use tracing::info;

use gomcaddy_core::{Order, Review, ReviewRequest};

use crate::error::ApiResult;
use crate::gateway::OrderGateway;

/// Submits a review for a delivered order.
///
/// Gate and rating failures are raised before any network call.
pub async fn submit_review<G: OrderGateway>(
    gateway: &G,
    order: &Order,
    rating: u8,
    comment: Option<String>,
) -> ApiResult<Review> {
    let request = ReviewRequest::for_order(order, rating, comment)?;

    let review = gateway.submit_review(&request).await?;
    info!(order_id = %review.order_id, rating = review.rating, "review submitted");
    Ok(review)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::FakeGateway;
    use chrono::Utc;
    use gomcaddy_core::{
        CoreError, DeliveryAddress, OrderStatus, PaymentStatus,
    };

    fn order(status: OrderStatus) -> Order {
        Order {
            id: "ord-1".to_string(),
            user_id: "user-1".to_string(),
            user_name: "Test User".to_string(),
            restaurant_id: "rest-1".to_string(),
            restaurant_name: "Mama's Kitchen".to_string(),
            items: vec![],
            total: 1000,
            status,
            payment_status: PaymentStatus::Paid,
            payment_reference: None,
            delivery_address: DeliveryAddress {
                street: "s".to_string(),
                city: "c".to_string(),
                state: "st".to_string(),
                phone: "p".to_string(),
            },
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_undelivered_order_rejected_before_network() {
        let gateway = FakeGateway::new();

        let err = submit_review(&gateway, &order(OrderStatus::Preparing), 5, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Invalid(CoreError::ReviewNotAllowed { .. })
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_rating_rejected_before_network() {
        let gateway = FakeGateway::new();

        let err = submit_review(&gateway, &order(OrderStatus::Delivered), 6, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Invalid(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delivered_order_review_goes_through() {
        let gateway = FakeGateway::new();

        let review = submit_review(
            &gateway,
            &order(OrderStatus::Delivered),
            4,
            Some("great suya".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(review.order_id, "ord-1");
        assert_eq!(review.restaurant_id, "rest-1");
        assert_eq!(review.rating, 4);
    }

    #[tokio::test]
    async fn test_duplicate_review_is_an_ordinary_error() {
        let gateway = FakeGateway::new();
        let delivered = order(OrderStatus::Delivered);

        submit_review(&gateway, &delivered, 4, None).await.unwrap();
        let err = submit_review(&gateway, &delivered, 4, None)
            .await
            .unwrap_err();

        // The uniqueness constraint is the store's; the client just
        // relays the rejection.
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Order already reviewed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
