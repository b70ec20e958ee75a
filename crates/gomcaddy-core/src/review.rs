//! # Review Gate
//!
//! Feedback can only be attached to a delivered order, once.
//!
//! The "once" half of that rule is a uniqueness constraint owned by the
//! review store; this module enforces everything checkable client-side
//! (delivered-only, rating range) so a doomed submission never reaches
//! the network. A duplicate-review rejection from the backend is an
//! ordinary error outcome, not a bug.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::lifecycle::OrderStatus;
use crate::types::{Order, ReviewRequest};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// Whether the review affordance should be offered for this order.
pub fn is_reviewable(order: &Order) -> bool {
    order.status == OrderStatus::Delivered
}

/// Rejects reviews for orders that are not delivered.
pub fn ensure_reviewable(order: &Order) -> CoreResult<()> {
    if is_reviewable(order) {
        Ok(())
    } else {
        Err(CoreError::ReviewNotAllowed {
            status: order.status,
        })
    }
}

/// Validates a star rating: an integer in [1, 5].
pub fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }
    Ok(())
}

impl ReviewRequest {
    /// Builds a review payload for an order, enforcing the gate.
    ///
    /// ## Errors
    /// - `ReviewNotAllowed` unless the order is `Delivered`
    /// - `Validation` for an out-of-range rating
    ///
    /// Both are raised before any network call.
    pub fn for_order(order: &Order, rating: u8, comment: Option<String>) -> CoreResult<Self> {
        ensure_reviewable(order)?;
        validate_rating(rating)?;

        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(ReviewRequest {
            restaurant_id: order.restaurant_id.clone(),
            order_id: order.id.clone(),
            rating,
            comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{PaymentStatus, ALL_STATUSES};
    use crate::types::DeliveryAddress;
    use chrono::Utc;

    fn order_with_status(status: OrderStatus) -> Order {
        Order {
            id: "ord-1".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Ada".to_string(),
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

    #[test]
    fn test_reviewable_iff_delivered() {
        for status in ALL_STATUSES {
            let order = order_with_status(status);
            assert_eq!(is_reviewable(&order), status == OrderStatus::Delivered);
        }
    }

    #[test]
    fn test_gate_rejects_undelivered_orders() {
        let order = order_with_status(OrderStatus::PickedUp);
        let err = ReviewRequest::for_order(&order, 5, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ReviewNotAllowed {
                status: OrderStatus::PickedUp
            }
        ));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_request_references_order_and_restaurant() {
        let order = order_with_status(OrderStatus::Delivered);
        let request =
            ReviewRequest::for_order(&order, 4, Some("  great suya  ".to_string())).unwrap();
        assert_eq!(request.order_id, "ord-1");
        assert_eq!(request.restaurant_id, "rest-1");
        assert_eq!(request.rating, 4);
        assert_eq!(request.comment.as_deref(), Some("great suya"));
    }

    #[test]
    fn test_blank_comment_becomes_none() {
        let order = order_with_status(OrderStatus::Delivered);
        let request = ReviewRequest::for_order(&order, 3, Some("   ".to_string())).unwrap();
        assert_eq!(request.comment, None);
    }
}
