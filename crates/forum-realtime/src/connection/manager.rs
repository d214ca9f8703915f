//! Connection manager: registration, eviction, lookup, and fan-out.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use forum_core::config::RealtimeConfig;
use forum_core::types::UserId;

use crate::metrics::RealtimeMetrics;
use crate::session_control::audit::ConnectionAudit;
use crate::session_control::terminator;

use super::handle::{ClientHandle, Enqueued};
use super::pool::ClientRegistry;

/// Owns the process-wide client registry.
///
/// Shared by reference with every connection task; created at engine start
/// and closed at engine shutdown.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Client registry.
    registry: ClientRegistry,
    /// Metrics.
    metrics: Arc<RealtimeMetrics>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, metrics: Arc<RealtimeMetrics>) -> Self {
        Self {
            registry: ClientRegistry::new(),
            metrics,
            config,
        }
    }

    /// Registers a new authenticated client for `user_id`.
    ///
    /// Any client already registered for the user is displaced: it gets a
    /// `force_logout` and is closed after the configured grace window.
    /// Returns the new handle and the receiving end of its outbound queue.
    pub fn register(&self, user_id: UserId) -> (Arc<ClientHandle>, mpsc::Receiver<String>) {
        let (handle, rx) = ClientHandle::new(user_id, self.config.outbound_queue_capacity);
        let handle = Arc::new(handle);

        let displaced = self.registry.register(handle.clone());
        self.metrics.connection_opened();
        ConnectionAudit::log_connection(user_id, handle.id, "registered");

        if let Some(old) = displaced {
            info!(
                user_id = %user_id,
                old_conn_id = %old.id,
                new_conn_id = %handle.id,
                "Duplicate login, displacing previous connection"
            );
            self.metrics.connection_closed();
            self.metrics.eviction();
            terminator::evict(
                old,
                &self.config.force_logout_reason,
                self.config.eviction_grace(),
            );
        }

        (handle, rx)
    }

    /// Removes `client` from the registry unless it was already superseded.
    pub fn unregister(&self, client: &ClientHandle) -> bool {
        let removed = self.registry.unregister(client);
        if removed {
            self.metrics.connection_closed();
            ConnectionAudit::log_connection(client.user_id, client.id, "unregistered");
        } else {
            debug!(
                conn_id = %client.id,
                user_id = %client.user_id,
                "Superseded connection left, registry untouched"
            );
        }
        removed
    }

    /// Enqueue a frame on one client, recording the outcome.
    pub fn enqueue(&self, client: &ClientHandle, frame: String) -> Enqueued {
        let outcome = client.enqueue(frame);
        match outcome {
            Enqueued::Queued => self.metrics.frame_enqueued(),
            Enqueued::Dropped => self.metrics.frame_dropped(),
            Enqueued::Closed => {}
        }
        outcome
    }

    /// Enqueue a frame for a user if they are online.
    pub fn send_to_user(&self, user_id: &UserId, frame: String) -> Option<Enqueued> {
        let client = self.registry.get(user_id)?;
        Some(self.enqueue(&client, frame))
    }

    /// Enqueue a copy of `frame` on every registered client.
    ///
    /// Iterates a snapshot; returns how many clients accepted the frame.
    pub fn broadcast_frame(&self, frame: &str) -> usize {
        self.registry
            .snapshot()
            .iter()
            .filter(|client| self.enqueue(client, frame.to_string()) == Enqueued::Queued)
            .count()
    }

    /// Point-in-time copy of all registered clients.
    pub fn snapshot(&self) -> Vec<Arc<ClientHandle>> {
        self.registry.snapshot()
    }

    /// Point-in-time copy of online user IDs.
    pub fn online_ids(&self) -> HashSet<UserId> {
        self.registry.online_ids()
    }

    /// Whether a user currently has a registered client.
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.registry.contains(user_id)
    }

    /// Active client for a user.
    pub fn get(&self, user_id: &UserId) -> Option<Arc<ClientHandle>> {
        self.registry.get(user_id)
    }

    /// Number of online users.
    pub fn online_count(&self) -> usize {
        self.registry.len()
    }

    /// Fire the close signal of every registered client.
    pub fn close_all(&self) {
        let clients = self.registry.snapshot();
        info!(count = clients.len(), "Closing all realtime connections");
        for client in clients {
            client.close();
        }
    }

    /// Hub configuration.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Shared metrics.
    pub fn metrics(&self) -> &Arc<RealtimeMetrics> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager(capacity: usize) -> ConnectionManager {
        let config = RealtimeConfig {
            outbound_queue_capacity: capacity,
            ..RealtimeConfig::default()
        };
        ConnectionManager::new(config, Arc::new(RealtimeMetrics::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_login_evicts_previous() {
        let mgr = manager(8);
        let user = UserId::new();

        let (a, mut a_rx) = mgr.register(user);
        let (b, _b_rx) = mgr.register(user);

        assert_eq!(mgr.online_count(), 1);
        assert_eq!(mgr.get(&user).unwrap().id, b.id);
        assert!(a_rx.try_recv().unwrap().contains("force_logout"));

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert!(a.is_closed());
        assert!(!b.is_closed());

        assert!(!mgr.unregister(&a));
        assert_eq!(mgr.get(&user).unwrap().id, b.id);

        let snap = mgr.metrics().snapshot();
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.connections_active, 1);
    }

    #[tokio::test]
    async fn test_send_to_offline_user_is_skipped() {
        let mgr = manager(8);
        assert!(mgr.send_to_user(&UserId::new(), "x".to_string()).is_none());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_client() {
        let mgr = manager(8);
        let (_a, mut a_rx) = mgr.register(UserId::new());
        let (_b, mut b_rx) = mgr.register(UserId::new());

        assert_eq!(mgr.broadcast_frame("hello"), 2);
        assert_eq!(a_rx.try_recv().unwrap(), "hello");
        assert_eq!(b_rx.try_recv().unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_close_all_signals_clients() {
        let mgr = manager(8);
        let (a, _a_rx) = mgr.register(UserId::new());
        mgr.close_all();
        assert!(a.is_closed());
    }
}
