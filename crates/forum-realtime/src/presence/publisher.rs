//! Presence publisher: builds each viewer's roster and pushes it.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use forum_core::AppResult;
use forum_core::traits::{MessageStore, UserDirectory};
use forum_core::types::UserId;

use crate::connection::handle::{ClientHandle, Enqueued};
use crate::connection::manager::ConnectionManager;
use crate::message::builder;

use super::entry::PresenceEntry;

/// Pushes `user_list` envelopes.
///
/// Every roster costs one directory call plus one last-message lookup per
/// listed user, so a full round is O(online clients x users). That is the
/// known scaling limit of the presence protocol.
pub struct PresencePublisher {
    connections: Arc<ConnectionManager>,
    users: Arc<dyn UserDirectory>,
    messages: Arc<dyn MessageStore>,
}

impl std::fmt::Debug for PresencePublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresencePublisher").finish()
    }
}

impl PresencePublisher {
    /// Creates a new presence publisher.
    pub fn new(
        connections: Arc<ConnectionManager>,
        users: Arc<dyn UserDirectory>,
        messages: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            connections,
            users,
            messages,
        }
    }

    /// Push a personalized roster to every registered client.
    ///
    /// Works on a registry snapshot; each client's roster is computed and
    /// enqueued independently.
    pub async fn broadcast_presence(&self) {
        let clients = self.connections.snapshot();
        self.connections.metrics().presence_broadcast();
        debug!(clients = clients.len(), "Broadcasting presence");

        join_all(clients.iter().map(|client| self.send_user_list(client))).await;
    }

    /// Compute and enqueue one client's roster. Storage failures skip the push.
    pub async fn send_user_list(&self, client: &ClientHandle) -> Option<Enqueued> {
        let roster = match self.roster_for(client.user_id).await {
            Ok(roster) => roster,
            Err(e) => {
                warn!(user_id = %client.user_id, error = %e, "Failed to build presence roster");
                return None;
            }
        };

        match builder::user_list_frame(roster) {
            Ok(frame) => Some(self.connections.enqueue(client, frame)),
            Err(e) => {
                warn!(user_id = %client.user_id, error = %e, "Failed to encode presence roster");
                None
            }
        }
    }

    /// Every user except `viewer`, in directory order, with online flags
    /// from a registry snapshot and the last message time with `viewer`.
    pub async fn roster_for(&self, viewer: UserId) -> AppResult<Vec<PresenceEntry>> {
        let users = self.users.list_users_except(viewer).await?;
        let online = self.connections.online_ids();

        let mut roster = Vec::with_capacity(users.len());
        for user in users.into_iter().filter(|u| u.id != viewer) {
            let last_msg = match self.messages.last_message_time(viewer, user.id).await {
                Ok(at) => at,
                Err(e) => {
                    warn!(viewer = %viewer, other = %user.id, error = %e, "Last message lookup failed");
                    None
                }
            };

            roster.push(PresenceEntry {
                online: online.contains(&user.id),
                id: user.id,
                nickname: user.nickname,
                last_msg,
            });
        }

        Ok(roster)
    }
}
