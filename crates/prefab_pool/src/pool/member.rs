//! Pool membership marker

use crate::scene::PrototypeKey;

/// Tag attached to every pooled instance naming the pool that owns it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolMember {
    /// Key of the owning pool
    pub prototype: PrototypeKey,
}

impl PoolMember {
    /// Create a marker for the pool keyed by `prototype`
    pub fn new(prototype: PrototypeKey) -> Self {
        Self { prototype }
    }
}
