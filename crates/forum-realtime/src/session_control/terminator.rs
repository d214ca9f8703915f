//! Displacing a client superseded by a newer login.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::connection::handle::{ClientHandle, Enqueued};
use crate::message::builder;

use super::audit::ConnectionAudit;

/// Notify a displaced client and close it after `grace`.
///
/// The `force_logout` frame is enqueued best-effort. The close fires once
/// the grace window elapses so the writer has a chance to flush the notice;
/// the writer drains whatever is still queued after the close signal too.
/// If the peer goes away earlier the task ends without waiting.
pub fn evict(client: Arc<ClientHandle>, reason: &str, grace: Duration) -> JoinHandle<()> {
    ConnectionAudit::log_connection(client.user_id, client.id, "evicted");

    match builder::force_logout_frame(reason) {
        Ok(frame) => match client.enqueue(frame) {
            Enqueued::Queued => {}
            outcome => debug!(
                conn_id = %client.id,
                ?outcome,
                "force_logout not queued for displaced client"
            ),
        },
        Err(e) => warn!(conn_id = %client.id, error = %e, "Failed to build force_logout frame"),
    }

    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(grace) => {
                info!(
                    conn_id = %client.id,
                    user_id = %client.user_id,
                    "Closing displaced connection"
                );
                client.close();
            }
            _ = client.shutdown_token().cancelled() => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::types::UserId;

    #[tokio::test(start_paused = true)]
    async fn test_notice_then_close_after_grace() {
        let (handle, mut rx) = ClientHandle::new(UserId::new(), 4);
        let handle = Arc::new(handle);

        let task = evict(handle.clone(), "logged in elsewhere", Duration::from_secs(2));

        let frame = rx.try_recv().unwrap();
        assert!(frame.contains("force_logout"));
        assert!(!handle.is_closed());

        tokio::time::sleep(Duration::from_millis(1_900)).await;
        assert!(!handle.is_closed());

        task.await.unwrap();
        assert!(handle.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_still_closes() {
        let (handle, _rx) = ClientHandle::new(UserId::new(), 1);
        let handle = Arc::new(handle);
        handle.enqueue("filler".to_string());

        evict(handle.clone(), "logged in elsewhere", Duration::from_secs(2))
            .await
            .unwrap();

        assert!(handle.is_closed());
    }
}
