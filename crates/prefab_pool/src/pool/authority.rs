//! Spawn authority strategies
//!
//! The registry asks its authority before every spawn and despawn and reports
//! completed operations back to it. Local play allows everything; networked
//! play lives in [`crate::network::NetworkAuthority`].

use crate::foundation::collections::EntityId;
use crate::foundation::math::Transform;
use crate::pool::PoolResult;
use crate::scene::Prototype;

/// Decides who may spawn and observes what was spawned
pub trait SpawnAuthority {
    /// Short label for log lines
    fn name(&self) -> &'static str;

    /// Whether this process may spawn and despawn
    fn may_spawn(&self) -> bool;

    /// Veto a prototype before anything is acquired
    fn check_prototype(&self, _prototype: &Prototype) -> PoolResult<()> {
        Ok(())
    }

    /// Called after an instance has been acquired and posed
    fn on_spawned(&mut self, entity: EntityId, prototype: &Prototype, transform: Transform);

    /// Called after an instance has been returned to its pool, or before an
    /// instance still in use is destroyed by a registry teardown
    fn on_despawned(&mut self, entity: EntityId);
}

/// Single-process authority: every caller may spawn, nothing is replicated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalAuthority;

impl SpawnAuthority for LocalAuthority {
    fn name(&self) -> &'static str {
        "local"
    }

    fn may_spawn(&self) -> bool {
        true
    }

    fn on_spawned(&mut self, _entity: EntityId, _prototype: &Prototype, _transform: Transform) {}

    fn on_despawned(&mut self, _entity: EntityId) {}
}
