//! Connection lifecycle audit trail.

use tracing::info;

use forum_core::types::UserId;

use crate::connection::handle::ConnectionId;

/// Logs hub lifecycle events with a stable set of fields.
#[derive(Debug, Clone)]
pub struct ConnectionAudit;

impl ConnectionAudit {
    /// Logs a connection lifecycle action (`registered`, `evicted`, ...).
    pub fn log_connection(user_id: UserId, conn_id: ConnectionId, action: &str) {
        info!(
            user_id = %user_id,
            conn_id = %conn_id,
            action = %action,
            "RT connection audit"
        );
    }
}
