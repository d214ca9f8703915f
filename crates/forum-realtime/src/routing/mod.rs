//! Inbound frame dispatch and private message fan-out.

pub mod router;

pub use router::MessageRouter;
