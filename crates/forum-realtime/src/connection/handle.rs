//! Per-connection client handle.

use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use forum_core::types::UserId;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// Lifecycle of a client. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientState {
    /// Registered, reader and writer running.
    Active = 0,
    /// Read loop exited; the queue is closed and the writer drains it.
    Closing = 1,
    /// Both tasks ended.
    Gone = 2,
}

impl ClientState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Active,
            1 => Self::Closing,
            _ => Self::Gone,
        }
    }
}

/// Result of a non-blocking enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// The frame is queued for the writer.
    Queued,
    /// The queue was full and the frame was dropped.
    Dropped,
    /// The queue is closed; the client is going away.
    Closed,
}

/// A handle to a single live connection.
///
/// Holds the bounded outbound queue and the shared close signal. The reader
/// and writer tasks never call each other; they coordinate only through
/// these two.
#[derive(Debug)]
pub struct ClientHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// User who owns this connection
    pub user_id: UserId,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    shutdown: CancellationToken,
    state: AtomicU8,
}

impl ClientHandle {
    /// Create a handle with an outbound queue of `capacity` frames.
    ///
    /// Returns the receiving end of the queue for the writer task.
    pub fn new(user_id: UserId, capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = Self {
            id: Uuid::new_v4(),
            user_id,
            connected_at: Utc::now(),
            sender,
            shutdown: CancellationToken::new(),
            state: AtomicU8::new(ClientState::Active as u8),
        };
        (handle, receiver)
    }

    /// Queue a serialized frame without waiting.
    ///
    /// A full queue drops the frame: a stalled client must never block the
    /// sender or a registry lock holder.
    pub fn enqueue(&self, frame: String) -> Enqueued {
        match self.sender.try_send(frame) {
            Ok(()) => Enqueued::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    user_id = %self.user_id,
                    "Outbound queue full, dropping frame"
                );
                Enqueued::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Enqueued::Closed,
        }
    }

    /// Number of frames waiting for the writer.
    pub fn queued_frames(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// Signal both tasks to stop. Idempotent.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    /// Whether the close signal has fired.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// The shared close signal.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClientState {
        ClientState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Enter `Closing` (no-op when already past it).
    pub fn mark_closing(&self) {
        self.state
            .fetch_max(ClientState::Closing as u8, Ordering::SeqCst);
    }

    /// Enter `Gone`, passing through `Closing` first.
    pub fn mark_gone(&self) {
        self.mark_closing();
        self.state.fetch_max(ClientState::Gone as u8, Ordering::SeqCst);
    }
}
