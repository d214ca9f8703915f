//! Reader and writer loops for one client.
//!
//! The two loops never call each other. They share only the outbound queue
//! and the client's close signal.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::routing::MessageRouter;

use super::adapter::{FrameSink, FrameSource, TransportError};
use super::handle::ClientHandle;

/// Pull frames from the transport and dispatch them until the peer leaves,
/// the transport fails, or the close signal fires.
pub async fn read_loop<S: FrameSource>(
    client: &Arc<ClientHandle>,
    mut source: S,
    router: &MessageRouter,
) {
    let shutdown = client.shutdown_token().clone();

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!(conn_id = %client.id, "Read loop stopped by close signal");
                break;
            }
            received = source.receive() => match received {
                Ok(frame) => frame,
                Err(TransportError::Closed) => {
                    debug!(conn_id = %client.id, "Peer closed connection");
                    break;
                }
                Err(e) => {
                    debug!(conn_id = %client.id, error = %e, "Read failed");
                    break;
                }
            },
        };

        router.handle_frame(client, &frame).await;
    }
}

/// Drain the outbound queue to the transport in FIFO order.
///
/// After the close signal the queue is closed, whatever is still buffered is
/// flushed, and the transport is closed. A failed write fires the close
/// signal so the reader stops too.
pub async fn write_loop<S: FrameSink>(
    client: Arc<ClientHandle>,
    mut queue: mpsc::Receiver<String>,
    mut sink: S,
) {
    let shutdown = client.shutdown_token().clone();

    loop {
        tokio::select! {
            biased;
            next = queue.recv() => match next {
                Some(frame) => {
                    if let Err(e) = sink.send(frame).await {
                        debug!(conn_id = %client.id, error = %e, "Write failed");
                        client.close();
                        break;
                    }
                }
                None => break,
            },
            _ = shutdown.cancelled() => {
                queue.close();
                while let Some(frame) = queue.recv().await {
                    if sink.send(frame).await.is_err() {
                        break;
                    }
                }
                break;
            }
        }
    }

    sink.close().await;
    debug!(conn_id = %client.id, "Write loop finished");
}
