//! Realtime hub counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Hub-level metrics counters.
#[derive(Debug, Default)]
pub struct RealtimeMetrics {
    connections_total: AtomicU64,
    connections_active: AtomicU64,
    evictions: AtomicU64,
    frames_received: AtomicU64,
    frames_enqueued: AtomicU64,
    messages_routed: AtomicU64,
    messages_rejected: AtomicU64,
    frames_dropped: AtomicU64,
    presence_broadcasts: AtomicU64,
}

impl RealtimeMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// A client was registered.
    pub fn connection_opened(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// A client left the registry.
    pub fn connection_closed(&self) {
        let _ = self
            .connections_active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// An older client was displaced by a new login.
    pub fn eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// An inbound frame was read from a connection.
    pub fn frame_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// An outbound frame was accepted by a client queue.
    pub fn frame_enqueued(&self) {
        self.frames_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// A private message was persisted and delivered.
    pub fn message_routed(&self) {
        self.messages_routed.fetch_add(1, Ordering::Relaxed);
    }

    /// A send attempt failed validation or storage.
    pub fn message_rejected(&self) {
        self.messages_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// A frame was dropped because a queue was full.
    pub fn frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// A presence round went out.
    pub fn presence_broadcast(&self) {
        self.presence_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_enqueued: self.frames_enqueued.load(Ordering::Relaxed),
            messages_routed: self.messages_routed.load(Ordering::Relaxed),
            messages_rejected: self.messages_rejected.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            presence_broadcasts: self.presence_broadcasts.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Clients ever registered
    pub connections_total: u64,
    /// Clients currently registered
    pub connections_active: u64,
    /// Clients displaced by a newer login
    pub evictions: u64,
    /// Inbound frames read
    pub frames_received: u64,
    /// Outbound frames queued
    pub frames_enqueued: u64,
    /// Messages persisted and delivered
    pub messages_routed: u64,
    /// Send attempts that were discarded
    pub messages_rejected: u64,
    /// Frames lost to full queues
    pub frames_dropped: u64,
    /// Presence rounds sent
    pub presence_broadcasts: u64,
}
