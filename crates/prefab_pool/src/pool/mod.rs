//! Prototype-keyed entity pooling
//!
//! ```text
//! PoolRegistry<A: SpawnAuthority>
//!         ├── authority check (A::may_spawn)
//!         └── HashMap<PrototypeKey, Pool>
//!                     ├── group entity (organization only)
//!                     └── inactive stack (LIFO, generation-checked handles)
//! ```
//!
//! Spawning pops the most recently released instance whose handle still
//! resolves, or instantiates a new one from the prototype and tags it with a
//! [`PoolMember`] marker. Despawning reads that marker to find the owning
//! pool; entities without one are destroyed instead.

pub mod authority;
pub mod error;
pub mod member;
#[allow(clippy::module_inception)]
pub mod pool;
pub mod registry;

pub use authority::{LocalAuthority, SpawnAuthority};
pub use error::{PoolError, PoolResult};
pub use member::PoolMember;
pub use pool::{Pool, PoolStats};
pub use registry::{Despawned, PoolRegistry, RegistryStats};
