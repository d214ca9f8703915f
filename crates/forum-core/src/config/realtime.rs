//! Real-time hub configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Capacity of each client's outbound frame queue. Frames enqueued
    /// while the queue is full are dropped.
    #[serde(default = "default_queue_capacity")]
    pub outbound_queue_capacity: usize,
    /// How long a displaced client keeps its socket after being told to
    /// log out, in milliseconds.
    #[serde(default = "default_eviction_grace")]
    pub eviction_grace_ms: u64,
    /// Largest inbound text frame accepted, in bytes.
    #[serde(default = "default_max_frame")]
    pub max_frame_bytes: usize,
    /// Reason string carried by the `force_logout` envelope.
    #[serde(default = "default_force_logout_reason")]
    pub force_logout_reason: String,
}

impl RealtimeConfig {
    /// Eviction grace window as a [`Duration`].
    pub fn eviction_grace(&self) -> Duration {
        Duration::from_millis(self.eviction_grace_ms)
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_queue_capacity: default_queue_capacity(),
            eviction_grace_ms: default_eviction_grace(),
            max_frame_bytes: default_max_frame(),
            force_logout_reason: default_force_logout_reason(),
        }
    }
}

fn default_queue_capacity() -> usize {
    256
}

fn default_eviction_grace() -> u64 {
    2000
}

fn default_max_frame() -> usize {
    65_536
}

fn default_force_logout_reason() -> String {
    "logged in elsewhere".to_string()
}
