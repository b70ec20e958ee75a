//! # Operator Status Updates
//!
//! The dashboard advances orders through the lifecycle with
//! `PATCH /orders/{id}/status`. The server is authoritative, but the
//! client checks the same transition table first so requests that can
//! only fail (terminal orders, skipped states) never leave the machine.

use tracing::info;

use gomcaddy_core::{Order, OrderStatus};

use crate::error::ApiResult;
use crate::gateway::OrderGateway;

/// Requests a status transition for an order.
///
/// ## Errors
/// - `Invalid(TerminalOrder)` when the order is delivered or cancelled
/// - `Invalid(InvalidTransition)` for any move not in the table
///
/// Both are raised before the network; the backend re-validates with
/// the same rules.
pub async fn update_status<G: OrderGateway>(
    gateway: &G,
    order: &Order,
    to: OrderStatus,
) -> ApiResult<Order> {
    order.status.transition(to)?;

    let updated = gateway.update_order_status(&order.id, to).await?;
    info!(order_id = %updated.id, from = %order.status, to = %updated.status, "order status updated");
    Ok(updated)
}

/// Cancels an order (legal from any non-terminal state).
pub async fn cancel<G: OrderGateway>(gateway: &G, order: &Order) -> ApiResult<Order> {
    update_status(gateway, order, OrderStatus::Cancelled).await
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
    use gomcaddy_core::{CoreError, DeliveryAddress, PaymentStatus};

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
    async fn test_valid_transition_goes_through() {
        let gateway = FakeGateway::new();
        gateway.insert_order(order(OrderStatus::Confirmed));

        let updated = update_status(&gateway, &order(OrderStatus::Confirmed), OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_terminal_order_rejected_before_network() {
        let gateway = FakeGateway::new();
        gateway.insert_order(order(OrderStatus::Delivered));

        let err = update_status(&gateway, &order(OrderStatus::Delivered), OrderStatus::Preparing)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Invalid(CoreError::TerminalOrder { .. })
        ));
        assert_eq!(gateway.call_count("update_order_status"), 0);
    }

    #[tokio::test]
    async fn test_skipping_states_rejected_before_network() {
        let gateway = FakeGateway::new();
        gateway.insert_order(order(OrderStatus::Pending));

        let err = update_status(&gateway, &order(OrderStatus::Pending), OrderStatus::Ready)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Invalid(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(gateway.call_count("update_order_status"), 0);
    }

    #[tokio::test]
    async fn test_cancel_from_any_non_terminal_state() {
        let gateway = FakeGateway::new();
        gateway.insert_order(order(OrderStatus::Preparing));

        let updated = cancel(&gateway, &order(OrderStatus::Preparing)).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);
    }
}
