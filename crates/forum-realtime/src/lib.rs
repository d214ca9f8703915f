//! # forum-realtime
//!
//! Real-time presence and private messaging hub. Provides:
//!
//! - A transport-agnostic connection adapter and an in-memory transport
//! - One registered client per user, with eviction of duplicate logins
//! - Bounded per-client outbound queues that drop on overflow
//! - Personalized presence rosters pushed on every membership change
//! - Private message routing (persist, read back, fan out)
//! - A broadcast gateway for application events

pub mod connection;
pub mod message;
pub mod metrics;
pub mod presence;
pub mod routing;
pub mod server;
pub mod session_control;

pub use connection::authenticator::WsAuthenticator;
pub use connection::manager::ConnectionManager;
pub use message::envelope::Envelope;
pub use presence::publisher::PresencePublisher;
pub use routing::router::MessageRouter;
pub use server::RealtimeEngine;
pub use session_control::broadcast::BroadcastGateway;
