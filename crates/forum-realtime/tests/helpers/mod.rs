//! Shared helpers for hub integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::task::JoinHandle;

use forum_core::config::RealtimeConfig;
use forum_core::traits::{MessageStore, UserDirectory};
use forum_core::types::{ChatMessage, MessageId, NewChatMessage, UserId, UserSummary};
use forum_core::{AppError, AppResult};
use forum_realtime::RealtimeEngine;
use forum_realtime::connection::memory::{self, MemoryPeer};

/// In-memory user directory and message store.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserSummary>>,
    messages: Mutex<Vec<ChatMessage>>,
    fail_persist: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, nickname: &str) -> UserId {
        let id = UserId::new();
        self.users.lock().unwrap().push(UserSummary {
            id,
            nickname: nickname.to_string(),
        });
        id
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn set_fail_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    fn nickname(&self, id: UserId) -> String {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.nickname.clone())
            .unwrap_or_default()
    }
}

fn between(m: &ChatMessage, a: UserId, b: UserId) -> bool {
    (m.sender_id == a && m.receiver_id == b) || (m.sender_id == b && m.receiver_id == a)
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn list_users_except(&self, viewer: UserId) -> AppResult<Vec<UserSummary>> {
        let mut users: Vec<UserSummary> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id != viewer)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(users)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn persist_message(&self, message: &NewChatMessage) -> AppResult<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(AppError::database("storage unavailable"));
        }
        let record = ChatMessage {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            sender_name: self.nickname(message.sender_id),
            content: message.content.clone(),
            image_url: message.image_url.clone(),
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(record);
        Ok(())
    }

    async fn fetch_message(&self, id: MessageId) -> AppResult<ChatMessage> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("message not found"))
    }

    async fn last_message_time(&self, a: UserId, b: UserId) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| between(m, a, b))
            .map(|m| m.created_at)
            .max())
    }

    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<ChatMessage>> {
        let all: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| between(m, a, b))
            .cloned()
            .collect();
        let end = all.len().saturating_sub(offset as usize);
        let start = end.saturating_sub(limit as usize);
        Ok(all[start..end].to_vec())
    }
}

/// Engine over a fresh in-memory store.
pub fn engine(store: &Arc<MemoryStore>) -> RealtimeEngine {
    engine_with(store, RealtimeConfig::default())
}

pub fn engine_with(store: &Arc<MemoryStore>, config: RealtimeConfig) -> RealtimeEngine {
    RealtimeEngine::new(config, store.clone(), store.clone())
}

/// Open an in-memory connection for `user` and serve it in the background.
pub fn connect(engine: &RealtimeEngine, user: UserId) -> (MemoryPeer, JoinHandle<()>) {
    let (source, sink, peer) = memory::pair();
    let engine = engine.clone();
    let task = tokio::spawn(async move { engine.serve_connection(user, source, sink).await });
    (peer, task)
}

/// Next frame of any type, parsed.
pub async fn next_frame(peer: &mut MemoryPeer) -> Option<Value> {
    let frame = tokio::time::timeout(Duration::from_secs(5), peer.recv())
        .await
        .expect("timed out waiting for a frame")?;
    Some(serde_json::from_str(&frame).expect("frame is JSON"))
}

/// Skip frames until one with the given tag arrives.
pub async fn next_of_type(peer: &mut MemoryPeer, kind: &str) -> Value {
    loop {
        let frame = next_frame(peer).await.expect("connection closed");
        if frame["type"] == kind {
            return frame;
        }
    }
}

/// Skip rosters until one satisfies `pred`; returns its payload.
pub async fn roster_until(peer: &mut MemoryPeer, pred: impl Fn(&[Value]) -> bool) -> Vec<Value> {
    loop {
        let frame = next_of_type(peer, "user_list").await;
        let entries = frame["payload"].as_array().cloned().unwrap_or_default();
        if pred(&entries) {
            return entries;
        }
    }
}

/// Whether a roster lists `user` as online.
pub fn is_online_in(entries: &[Value], user: UserId) -> bool {
    entries
        .iter()
        .any(|e| e["id"] == user.to_string() && e["online"] == true)
}

/// `send_message` frame text.
pub fn send_message(receiver: UserId, content: &str) -> String {
    serde_json::json!({
        "type": "send_message",
        "payload": { "receiver_id": receiver.to_string(), "content": content }
    })
    .to_string()
}
