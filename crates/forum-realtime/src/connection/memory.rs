//! In-process transport backed by unbounded channels.
//!
//! Used to drive the hub without sockets: the [`MemoryPeer`] plays the role
//! of the remote client.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::adapter::{FrameSink, FrameSource, TransportError};

/// Server-side receiving half.
#[derive(Debug)]
pub struct MemorySource {
    inbound: mpsc::UnboundedReceiver<String>,
}

/// Server-side sending half.
#[derive(Debug)]
pub struct MemorySink {
    outbound: Option<mpsc::UnboundedSender<String>>,
}

/// Client-side end of a memory connection.
#[derive(Debug)]
pub struct MemoryPeer {
    inbound: Option<mpsc::UnboundedSender<String>>,
    outbound: mpsc::UnboundedReceiver<String>,
}

/// Create a connected source/sink pair and the peer that drives it.
pub fn pair() -> (MemorySource, MemorySink, MemoryPeer) {
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    (
        MemorySource { inbound: in_rx },
        MemorySink {
            outbound: Some(out_tx),
        },
        MemoryPeer {
            inbound: Some(in_tx),
            outbound: out_rx,
        },
    )
}

#[async_trait]
impl FrameSource for MemorySource {
    async fn receive(&mut self) -> Result<String, TransportError> {
        self.inbound.recv().await.ok_or(TransportError::Closed)
    }
}

#[async_trait]
impl FrameSink for MemorySink {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        match &self.outbound {
            Some(tx) => tx.send(frame).map_err(|_| TransportError::Closed),
            None => Err(TransportError::Closed),
        }
    }

    async fn close(&mut self) {
        self.outbound = None;
    }
}

impl MemoryPeer {
    /// Send a frame to the server. Returns `false` once the server side is gone.
    pub fn send(&self, frame: impl Into<String>) -> bool {
        self.inbound
            .as_ref()
            .is_some_and(|tx| tx.send(frame.into()).is_ok())
    }

    /// Wait for the next frame written by the server; `None` once the server
    /// closed the connection and every frame has been read.
    pub async fn recv(&mut self) -> Option<String> {
        self.outbound.recv().await
    }

    /// Take a frame if one is already buffered.
    pub fn try_recv(&mut self) -> Option<String> {
        self.outbound.try_recv().ok()
    }

    /// Hang up from the client side.
    pub fn disconnect(&mut self) {
        self.inbound = None;
    }
}
