//! Entity records stored by the scene world

use crate::foundation::collections::EntityId;
use crate::foundation::math::Transform;
use crate::pool::PoolMember;
use crate::scene::PrototypeKey;

bitflags::bitflags! {
    /// Per-entity state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u8 {
        /// Entity participates in the frame (enabled)
        const ACTIVE = 1 << 0;
        /// A delayed destroy has been scheduled
        const PENDING_DESTROY = 1 << 1;
        /// Organizational node created by a pool
        const GROUP = 1 << 2;
    }
}

/// Everything the scene world knows about one entity
#[derive(Debug, Clone)]
pub struct EntityRecord {
    /// Display name
    pub name: String,
    /// Prototype this entity was instantiated from, if any
    pub prototype: Option<PrototypeKey>,
    /// State bits
    pub flags: EntityFlags,
    /// Local transform
    pub transform: Transform,
    /// Parent in the scene graph
    pub parent: Option<EntityId>,
    /// Direct children
    pub children: Vec<EntityId>,
    /// Pool membership marker
    pub member: Option<PoolMember>,
}

impl EntityRecord {
    pub(crate) fn new(name: impl Into<String>, flags: EntityFlags) -> Self {
        Self {
            name: name.into(),
            prototype: None,
            flags,
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
            member: None,
        }
    }

    /// Whether the entity is enabled
    pub fn is_active(&self) -> bool {
        self.flags.contains(EntityFlags::ACTIVE)
    }
}
