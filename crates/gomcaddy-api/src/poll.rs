//! # Polling Watcher
//!
//! Orders are server-owned; the client observes them by polling while a
//! view is mounted and stops the moment it unmounts.
//!
//! ## Task Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Poller Task                                     │
//! │                                                                         │
//! │   interval tick ──► spawn fetch(seq=n) ──┐   (each tick is an          │
//! │   interval tick ──► spawn fetch(seq=n+1) ┤    independent request,     │
//! │                                          │    no de-duplication)       │
//! │                                          ▼                              │
//! │                  ┌──────────────────────────────┐                       │
//! │                  │  StaleGuard                  │                       │
//! │                  │  admit only seq > last seen  │──► watch channel     │
//! │                  └──────────────────────────────┘      (views read     │
//! │                                                         latest value)  │
//! │                                                                         │
//! │   PollHandle::shutdown() ──► loop exits, sender drops, views notice    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without the guard, a slow response issued at tick N could arrive
//! after tick N+1's response and overwrite newer state with older
//! state. Responses are applied in issue order or not at all; fetch
//! errors are logged and skipped, keeping the last good value.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use gomcaddy_core::{Order, OrderStatus};

use crate::error::ApiResult;
use crate::gateway::OrderGateway;

// =============================================================================
// Stale Guard
// =============================================================================

/// Orders poll responses by issue sequence.
///
/// `admit` returns true iff the response is newer than everything
/// already applied; older responses are discarded.
#[derive(Debug, Default)]
pub struct StaleGuard {
    last_applied: Option<u64>,
}

impl StaleGuard {
    pub fn new() -> Self {
        StaleGuard::default()
    }

    /// Decides whether the response for request `seq` may be applied.
    pub fn admit(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(last) if seq <= last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }
}

// =============================================================================
// Poll Handle
// =============================================================================

/// Cancels a running poller. Bound to the observing view's lifetime.
#[derive(Debug, Clone)]
pub struct PollHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl PollHandle {
    /// Stops the poller. Safe to call more than once.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

// =============================================================================
// Poller
// =============================================================================

/// Fixed-interval poller publishing through a `watch` channel.
pub struct Poller;

impl Poller {
    /// Spawns a poll loop calling `fetch` on every tick.
    ///
    /// The first tick fires immediately, then every `interval`. Each
    /// tick runs as its own task, so a slow response never delays the
    /// next tick; the [`StaleGuard`] keeps late arrivals from clobbering
    /// newer state. The receiver starts at `None` ("loading") and then
    /// always holds the latest admitted value.
    ///
    /// The loop ends on [`PollHandle::shutdown`] or once every receiver
    /// is dropped.
    pub fn spawn<T, F, Fut>(
        interval: Duration,
        fetch: F,
    ) -> (PollHandle, watch::Receiver<Option<T>>)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(u64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (state_tx, state_rx) = watch::channel::<Option<T>>(None);
        let (result_tx, mut result_rx) = mpsc::channel::<(u64, ApiResult<T>)>(8);

        let fetch = Arc::new(fetch);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut guard = StaleGuard::new();
            let mut seq: u64 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        seq += 1;
                        let fetch = fetch.clone();
                        let result_tx = result_tx.clone();
                        let n = seq;
                        tokio::spawn(async move {
                            let result = (*fetch)(n).await;
                            let _ = result_tx.send((n, result)).await;
                        });
                    }

                    Some((n, result)) = result_rx.recv() => {
                        match result {
                            Ok(value) => {
                                if guard.admit(n) {
                                    if state_tx.send(Some(value)).is_err() {
                                        debug!("all poll receivers dropped, stopping");
                                        break;
                                    }
                                } else {
                                    debug!(seq = n, "discarding stale poll response");
                                }
                            }
                            Err(e) => {
                                // Keep the last good value; the next tick
                                // is the retry.
                                warn!(seq = n, error = %e, "poll tick failed");
                            }
                        }
                    }

                    _ = shutdown_rx.recv() => {
                        debug!("poller received shutdown");
                        break;
                    }
                }
            }
        });

        (PollHandle { shutdown_tx }, state_rx)
    }
}

// =============================================================================
// Order Watchers
// =============================================================================

/// Polls one order's detail view.
pub fn watch_order<G>(
    gateway: Arc<G>,
    order_id: impl Into<String>,
    interval: Duration,
) -> (PollHandle, watch::Receiver<Option<Order>>)
where
    G: OrderGateway + 'static,
{
    let order_id = order_id.into();
    Poller::spawn(interval, move |_seq| {
        let gateway = gateway.clone();
        let order_id = order_id.clone();
        async move { gateway.fetch_order(&order_id).await }
    })
}

/// Polls the caller's order list.
pub fn watch_orders<G>(
    gateway: Arc<G>,
    interval: Duration,
) -> (PollHandle, watch::Receiver<Option<Vec<Order>>>)
where
    G: OrderGateway + 'static,
{
    Poller::spawn(interval, move |_seq| {
        let gateway = gateway.clone();
        async move { gateway.fetch_orders().await }
    })
}

/// Polls the operator's order list, optionally filtered by status.
pub fn watch_all_orders<G>(
    gateway: Arc<G>,
    status: Option<OrderStatus>,
    interval: Duration,
) -> (PollHandle, watch::Receiver<Option<Vec<Order>>>)
where
    G: OrderGateway + 'static,
{
    Poller::spawn(interval, move |_seq| {
        let gateway = gateway.clone();
        async move { gateway.fetch_all_orders(status).await }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::FakeGateway;
    use gomcaddy_core::{DeliveryAddress, PaymentStatus};
    use chrono::Utc;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("gomcaddy_api=debug")
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_stale_guard_admits_in_order() {
        let mut guard = StaleGuard::new();
        assert!(guard.admit(1));
        assert!(guard.admit(2));
        assert!(guard.admit(5));
    }

    #[test]
    fn test_stale_guard_discards_old_and_duplicate() {
        let mut guard = StaleGuard::new();
        assert!(guard.admit(3));
        assert!(!guard.admit(2), "older than applied");
        assert!(!guard.admit(3), "already applied");
        assert!(guard.admit(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_publishes_each_tick() {
        init_tracing();
        let (handle, mut rx) =
            Poller::spawn(Duration::from_secs(5), |seq| async move { Ok::<_, ApiError>(seq) });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(1));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(2));

        handle.shutdown().await;
        assert!(rx.changed().await.is_err(), "sender gone after shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_never_overwrites_newer_state() {
        init_tracing();
        // The first request is slow and lands after three newer ones
        // have been applied; it must be discarded.
        let (handle, mut rx) = Poller::spawn(Duration::from_secs(5), |seq| async move {
            if seq == 1 {
                tokio::time::sleep(Duration::from_secs(12)).await;
            }
            Ok::<_, ApiError>(seq)
        });

        let mut seen = Vec::new();
        while seen.len() < 3 {
            rx.changed().await.unwrap();
            let value = (*rx.borrow()).expect("poller published");
            seen.push(value);
        }
        handle.shutdown().await;

        assert_eq!(seen, vec![2, 3, 4]);
        assert!(!seen.contains(&1), "stale response was applied");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_errors_keep_last_good_value() {
        init_tracing();
        let (handle, mut rx) = Poller::spawn(Duration::from_secs(5), |seq| async move {
            if seq == 2 {
                Err(ApiError::Server {
                    status: 503,
                    detail: "unavailable".to_string(),
                })
            } else {
                Ok(seq)
            }
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(1));

        // Tick 2 fails; the next published value is tick 3's.
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(3));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_order_observes_server_progress() {
        init_tracing();
        let gateway = Arc::new(FakeGateway::new());
        gateway.insert_order(gomcaddy_core::Order {
            id: "ord-1".to_string(),
            user_id: "user-1".to_string(),
            user_name: "Test User".to_string(),
            restaurant_id: "rest-1".to_string(),
            restaurant_name: "Mama's Kitchen".to_string(),
            items: vec![],
            total: 1000,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
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
        });

        let (handle, mut rx) =
            watch_order(gateway.clone(), "ord-1", Duration::from_secs(5));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().status, OrderStatus::Pending);

        gateway.advance_order("ord-1", OrderStatus::Confirmed, PaymentStatus::Paid);

        rx.changed().await.unwrap();
        let order = rx.borrow().clone().unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);

        handle.shutdown().await;
    }
}
