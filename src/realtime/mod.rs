//! Realtime Subscription Layer
//!
//! Bridges the server's WebSocket pub/sub channel to per-topic callback
//! dispatch. Three pieces:
//!
//! - [`connection`]: owns the single long-lived socket, reconnects on a fixed
//!   delay, and keeps the link alive with heartbeats.
//! - [`registry`]: maps topic names to listeners and fans decoded events out
//!   to them.
//! - [`hook`]: the lifecycle-bound `use_topic` adapter components call; it is
//!   the only seam application code depends on.
//!
//! Events delivered here are refetch hints. Components re-query the REST API
//! for authoritative state rather than trusting event payloads.

pub mod connection;
pub mod events;
pub mod hook;
pub mod protocol;
pub mod registry;

pub use connection::{ConnectionState, SocketClient, SocketConfig};
pub use hook::{provide_socket, use_socket, use_topic};
pub use registry::{Subscription, TopicRegistry};
