//! Connection management: transport adapter, client handles, registry,
//! lifecycle loops, and authentication.

pub mod adapter;
pub mod authenticator;
pub mod handle;
pub mod manager;
pub mod memory;
pub mod pool;
pub mod pump;

pub use adapter::{FrameSink, FrameSource, TransportError};
pub use authenticator::WsAuthenticator;
pub use handle::{ClientHandle, ClientState, ConnectionId, Enqueued};
pub use manager::ConnectionManager;
pub use pool::ClientRegistry;
