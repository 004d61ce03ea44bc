//! Network collaborator interface

use crate::foundation::collections::EntityId;
use crate::foundation::math::Transform;
use crate::scene::{AssetId, PrototypeKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier a replicated entity is known by on every peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetId(pub u32);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Replication operations the networked pool needs
pub trait NetworkHost {
    /// Whether this process is the spawn authority (the server)
    fn is_authority(&self) -> bool;

    /// Start replicating a freshly spawned entity
    fn register(&mut self, entity: EntityId, asset_id: AssetId, transform: Transform) -> NetId;

    /// Stop replicating an entity; returns the id it had, if any
    fn unregister(&mut self, entity: EntityId) -> Option<NetId>;

    /// Bind an asset id to the pool that rebuilds it on this peer
    fn register_spawn_handler(&mut self, asset_id: AssetId, key: PrototypeKey);

    /// Pool key bound to an asset id
    fn spawn_handler(&self, asset_id: AssetId) -> Option<&PrototypeKey>;
}
