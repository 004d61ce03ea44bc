//! Network-aware pooling
//!
//! Only the authority may spawn or despawn. Spawns are registered with the
//! replication layer, and each prototype's asset id is bound to a client-side
//! spawn handler so peers rebuild replicated entities from their own pools.
//!
//! ```text
//! server registry ──spawn──► NetworkAuthority ──register──► LoopbackNetwork
//!                                                                  │ outbox
//!                                                                  ▼
//! client registry ◄──spawn_remote── ClientReplicator ◄── ReplicationMessage
//! ```

pub mod authority;
pub mod client;
pub mod host;
pub mod loopback;
pub mod message;

pub use authority::NetworkAuthority;
pub use client::ClientReplicator;
pub use host::{NetId, NetworkHost};
pub use loopback::LoopbackNetwork;
pub use message::{ReplicationMessage, WireError};
