//! Transport abstraction for one live connection.
//!
//! A connection is split into a receiving half, owned by the reader task,
//! and a sending half, owned by the writer task. Any error from either half
//! is terminal for the connection; there is no retry.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of the underlying transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer closed the connection or the stream ended.
    #[error("connection closed")]
    Closed,
    /// Any other read/write failure.
    #[error("transport failure: {0}")]
    Io(String),
}

/// Receiving half of a connection.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Wait for the next text frame. Control frames are handled internally.
    async fn receive(&mut self) -> Result<String, TransportError>;
}

/// Sending half of a connection.
#[async_trait]
pub trait FrameSink: Send + 'static {
    /// Write one text frame.
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Close the connection. Errors are ignored; the connection is gone
    /// either way.
    async fn close(&mut self);
}
