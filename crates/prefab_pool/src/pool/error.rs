//! Pool errors

use crate::foundation::collections::EntityId;
use crate::network::NetId;
use crate::scene::{AssetId, PrototypeKey};

/// Errors that can occur while spawning, despawning or replicating pooled entities
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    /// Caller is not the spawn authority
    #[error("{operation} rejected: this process is not the spawn authority")]
    NotAuthority {
        /// Operation that was refused
        operation: &'static str,
    },

    /// The host has no prototype registered under this key
    #[error("unknown prototype '{0}'")]
    UnknownPrototype(PrototypeKey),

    /// Handle no longer names a live entity
    #[error("entity {0:?} no longer exists")]
    EntityNotFound(EntityId),

    /// Instance is already sitting in its pool's inactive stack
    #[error("entity {0:?} is already inactive in its pool")]
    AlreadyInactive(EntityId),

    /// Instance belongs to a different pool
    #[error("entity {entity:?} does not belong to pool '{pool}'")]
    ForeignEntity {
        /// Entity passed to release
        entity: EntityId,
        /// Pool it was released into
        pool: PrototypeKey,
    },

    /// Spawn position or rotation contains NaN or infinity
    #[error("invalid spawn pose: {reason}")]
    InvalidPose {
        /// Description of the bad component
        reason: String,
    },

    /// Networked spawn of a prototype without an asset id
    #[error("prototype '{0}' has no network asset id")]
    MissingAssetId(PrototypeKey),

    /// Replicated spawn for an asset nobody registered a handler for
    #[error("no spawn handler registered for asset {0}")]
    NoSpawnHandler(AssetId),

    /// Replicated unspawn for a network id this peer never saw
    #[error("unknown network id {0}")]
    UnknownNetId(NetId),
}

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;
