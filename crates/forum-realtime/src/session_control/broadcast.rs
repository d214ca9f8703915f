//! Broadcast gateway for application events.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use forum_core::AppResult;

use crate::connection::manager::ConnectionManager;
use crate::message::builder;

/// Pushes typed events to every connected client.
///
/// Handed to request handlers outside the realtime subsystem (post creation
/// and similar). No acknowledgement and no retry.
#[derive(Debug, Clone)]
pub struct BroadcastGateway {
    connections: Arc<ConnectionManager>,
}

impl BroadcastGateway {
    /// Creates a new gateway.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Enqueue one `{type, payload}` envelope on every registered client.
    ///
    /// Returns how many clients accepted it.
    pub fn broadcast_all<T: Serialize + ?Sized>(&self, kind: &str, payload: &T) -> AppResult<usize> {
        let frame = builder::event_frame(kind, payload)?;
        let delivered = self.connections.broadcast_frame(&frame);
        debug!(kind = %kind, delivered, "Broadcast event");
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::config::RealtimeConfig;
    use forum_core::types::UserId;
    use serde_json::{Value, json};

    use crate::metrics::RealtimeMetrics;

    #[tokio::test]
    async fn test_broadcast_all_reaches_every_client() {
        let connections = Arc::new(ConnectionManager::new(
            RealtimeConfig::default(),
            Arc::new(RealtimeMetrics::new()),
        ));
        let (_a, mut a_rx) = connections.register(UserId::new());
        let (_b, mut b_rx) = connections.register(UserId::new());

        let gateway = BroadcastGateway::new(connections);
        let sent = gateway
            .broadcast_all("new_post", &json!({"id": "p1", "title": "Hello"}))
            .unwrap();
        assert_eq!(sent, 2);

        for rx in [&mut a_rx, &mut b_rx] {
            let value: Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
            assert_eq!(value["type"], "new_post");
            assert_eq!(value["payload"]["title"], "Hello");
        }
    }

    #[tokio::test]
    async fn test_broadcast_with_nobody_online() {
        let connections = Arc::new(ConnectionManager::new(
            RealtimeConfig::default(),
            Arc::new(RealtimeMetrics::new()),
        ));
        let gateway = BroadcastGateway::new(connections);
        assert_eq!(gateway.broadcast_all("new_post", &json!({})).unwrap(), 0);
    }
}
