//! Engine collaborator interface

use crate::foundation::collections::EntityId;
use crate::foundation::math::{Quat, Vec3};
use crate::pool::PoolMember;
use crate::scene::{Prototype, PrototypeKey};

/// Entity lifecycle operations a pool needs from the host engine
///
/// Handles are generation-counted: once an entity is destroyed,
/// [`is_alive`](EngineHost::is_alive) reports `false` for every handle that
/// ever named it. Mutators called with a dead handle are no-ops.
pub trait EngineHost {
    /// Look up a registered prototype
    fn prototype(&self, key: &PrototypeKey) -> Option<&Prototype>;

    /// Create a new, active entity from a prototype
    ///
    /// Returns `None` when the prototype is unknown.
    fn instantiate(&mut self, key: &PrototypeKey) -> Option<EntityId>;

    /// Create an empty organizational entity
    fn create_group(&mut self, name: &str) -> EntityId;

    /// Destroy an entity and its children immediately
    fn destroy(&mut self, entity: EntityId) -> bool;

    /// Schedule destruction after `delay` seconds
    ///
    /// A delay that is not a positive finite number destroys immediately.
    fn destroy_delayed(&mut self, entity: EntityId, delay: f32) -> bool;

    /// Whether the handle still names a live entity
    fn is_alive(&self, entity: EntityId) -> bool;

    /// Direct children of an entity, empty for a dead handle
    fn children(&self, entity: EntityId) -> &[EntityId];

    /// Whether the entity is alive and enabled
    fn is_active(&self, entity: EntityId) -> bool;

    /// Enable or disable an entity
    fn set_active(&mut self, entity: EntityId, active: bool);

    /// Reparent an entity; `None` detaches it
    fn set_parent(&mut self, entity: EntityId, parent: Option<EntityId>);

    /// Set position and rotation, keeping scale
    fn set_pose(&mut self, entity: EntityId, position: Vec3, rotation: Quat);

    /// Attach the pool membership marker
    fn attach_member(&mut self, entity: EntityId, member: PoolMember);

    /// Read the pool membership marker
    fn member(&self, entity: EntityId) -> Option<&PoolMember>;
}
