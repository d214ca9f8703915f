//! Displacement of duplicate logins, application broadcasts, and the
//! connection audit trail.

pub mod audit;
pub mod broadcast;
pub mod terminator;

pub use broadcast::BroadcastGateway;
