//! # Prefab Pool
//!
//! Prototype-keyed entity pooling for game engines.
//!
//! ## Features
//!
//! - **Recycling**: Despawned entities go back on a per-prototype stack and are reused
//! - **Membership Markers**: Every pooled entity knows its pool, so despawn needs only the handle
//! - **Safe Handles**: Generation-counted entity handles; externally destroyed instances are skipped
//! - **Spawn Authority**: One generic pool, local or server-authoritative via [`pool::SpawnAuthority`]
//! - **Replication**: Networked spawns are mirrored onto peers through their own pools
//!
//! ## Quick Start
//!
//! ```rust
//! use prefab_pool::prelude::*;
//!
//! let mut world = SceneWorld::new();
//! world.register_prototype(Prototype::new("bullet"));
//! let bullet = PrototypeKey::from("bullet");
//!
//! let mut pools = PoolRegistry::new();
//! pools.preload(&mut world, &bullet, 8)?;
//!
//! let shot = pools.spawn(&mut world, &bullet, Vec3::new(0.0, 1.0, 0.0), Quat::identity())?;
//! assert!(world.is_active(shot));
//!
//! pools.despawn(&mut world, shot)?;
//! assert_eq!(pools.stats().instantiated, 8);
//! # Ok::<(), PoolError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod network;
pub mod pool;
pub mod scene;

#[cfg(test)]
mod tests;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PoolConfig},
        foundation::{
            collections::EntityId,
            math::{Quat, Transform, Vec3},
        },
        network::{ClientReplicator, LoopbackNetwork, NetId, NetworkAuthority, NetworkHost, ReplicationMessage},
        pool::{
            Despawned, LocalAuthority, Pool, PoolError, PoolMember, PoolRegistry, PoolResult,
            SpawnAuthority,
        },
        scene::{AssetId, EngineHost, Prototype, PrototypeKey, SceneWorld},
    };
}
