//! Client registry: the single live connection per user.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use forum_core::types::UserId;

use super::handle::ClientHandle;

/// Thread-safe mapping from user ID to that user's one active client.
///
/// Every operation holds a shard lock only for the map access itself.
/// Callers iterate over [`ClientRegistry::snapshot`] so that no lock is
/// held across storage calls or network writes.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: DashMap<UserId, Arc<ClientHandle>>,
}

impl ClientRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Makes `client` the sole entry for its user.
    ///
    /// Returns the client it replaced, if any. The replacement is atomic;
    /// the caller is responsible for evicting the returned client.
    pub fn register(&self, client: Arc<ClientHandle>) -> Option<Arc<ClientHandle>> {
        self.clients.insert(client.user_id, client)
    }

    /// Removes the entry for `client.user_id` only if it still points at
    /// `client`. A superseded client's teardown therefore never deletes the
    /// newer registration. Returns whether an entry was removed.
    pub fn unregister(&self, client: &ClientHandle) -> bool {
        self.clients
            .remove_if(&client.user_id, |_, current| current.id == client.id)
            .is_some()
    }

    /// Looks up the active client for a user.
    pub fn get(&self, user_id: &UserId) -> Option<Arc<ClientHandle>> {
        self.clients.get(user_id).map(|entry| entry.value().clone())
    }

    /// Whether a user currently has an active client.
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.clients.contains_key(user_id)
    }

    /// Point-in-time copy of every active client.
    pub fn snapshot(&self) -> Vec<Arc<ClientHandle>> {
        self.clients
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Point-in-time copy of the online user IDs.
    pub fn online_ids(&self) -> HashSet<UserId> {
        self.clients.iter().map(|entry| *entry.key()).collect()
    }

    /// Number of registered clients (equal to the number of online users).
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
