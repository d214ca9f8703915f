//! Top-level realtime engine that ties the hub subsystems together.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use forum_core::AppResult;
use forum_core::config::RealtimeConfig;
use forum_core::traits::{MessageStore, UserDirectory};
use forum_core::types::UserId;

use crate::connection::adapter::{FrameSink, FrameSource};
use crate::connection::manager::ConnectionManager;
use crate::connection::pump;
use crate::metrics::RealtimeMetrics;
use crate::presence::PresencePublisher;
use crate::routing::MessageRouter;
use crate::session_control::BroadcastGateway;

/// Central realtime engine. Cheap to clone; every clone shares one registry.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager (owns the registry).
    pub connections: Arc<ConnectionManager>,
    /// Presence publisher.
    pub presence: Arc<PresencePublisher>,
    /// Inbound message router.
    pub router: Arc<MessageRouter>,
    /// Application broadcast gateway.
    pub broadcast: BroadcastGateway,
    /// Metrics collector.
    pub metrics: Arc<RealtimeMetrics>,
    /// Fired once on shutdown.
    shutdown: CancellationToken,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine")
            .field("online", &self.connections.online_count())
            .finish()
    }
}

impl RealtimeEngine {
    /// Creates a new realtime engine over the given collaborators.
    pub fn new(
        config: RealtimeConfig,
        users: Arc<dyn UserDirectory>,
        messages: Arc<dyn MessageStore>,
    ) -> Self {
        let metrics = Arc::new(RealtimeMetrics::new());
        let connections = Arc::new(ConnectionManager::new(config, metrics.clone()));
        let presence = Arc::new(PresencePublisher::new(
            connections.clone(),
            users,
            messages.clone(),
        ));
        let router = Arc::new(MessageRouter::new(
            connections.clone(),
            messages,
            presence.clone(),
        ));
        let broadcast = BroadcastGateway::new(connections.clone());

        info!("Realtime engine initialized");

        Self {
            connections,
            presence,
            router,
            broadcast,
            metrics,
            shutdown: CancellationToken::new(),
        }
    }

    /// Run one authenticated connection to completion.
    ///
    /// Registers the client (displacing any previous one), starts the writer,
    /// pushes presence, and runs the read loop on the current task. When the
    /// read loop ends the client is unregistered, presence is pushed again,
    /// and the writer is awaited after it flushes.
    pub async fn serve_connection<R, W>(&self, user_id: UserId, source: R, mut sink: W)
    where
        R: FrameSource,
        W: FrameSink,
    {
        if self.shutdown.is_cancelled() {
            sink.close().await;
            return;
        }

        let (client, queue) = self.connections.register(user_id);
        let writer = tokio::spawn(pump::write_loop(client.clone(), queue, sink));

        self.presence.broadcast_presence().await;

        pump::read_loop(&client, source, &self.router).await;

        client.mark_closing();
        self.connections.unregister(&client);
        client.close();

        self.presence.broadcast_presence().await;

        if let Err(e) = writer.await {
            warn!(conn_id = %client.id, error = %e, "Writer task failed");
        }
        client.mark_gone();
    }

    /// Push an application event to every connected client.
    pub fn broadcast_all<T: Serialize + ?Sized>(&self, kind: &str, payload: &T) -> AppResult<usize> {
        self.broadcast.broadcast_all(kind, payload)
    }

    /// Whether shutdown has started.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Initiates a graceful shutdown: refuses new connections and fires every
    /// client's close signal. Writers flush and exit, readers exit.
    pub fn shutdown(&self) {
        info!("Shutting down realtime engine");
        self.shutdown.cancel();
        self.connections.close_all();
    }
}
