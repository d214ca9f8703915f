//! Adapts an Axum WebSocket to the hub's frame source and sink.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

use forum_realtime::connection::{FrameSink, FrameSource, TransportError};

/// Receiving half of an upgraded socket.
pub struct WsSource(SplitStream<WebSocket>);

/// Sending half of an upgraded socket.
pub struct WsSink(SplitSink<WebSocket, Message>);

/// Split an upgraded socket into hub transport halves.
pub fn split(socket: WebSocket) -> (WsSource, WsSink) {
    let (tx, rx) = socket.split();
    (WsSource(rx), WsSink(tx))
}

#[async_trait]
impl FrameSource for WsSource {
    async fn receive(&mut self) -> Result<String, TransportError> {
        loop {
            match self.0.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
                Some(Ok(Message::Close(_))) | None => return Err(TransportError::Closed),
                // Ping/pong are answered by axum; binary frames are not part of the protocol.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::Io(e.to_string())),
            }
        }
    }
}

#[async_trait]
impl FrameSink for WsSink {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.0
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    async fn close(&mut self) {
        let _ = self.0.close().await;
    }
}
