//! Scene world
//!
//! In-process [`EngineHost`] backed by a slot map, so entity handles carry a
//! generation and go stale when the entity is destroyed.

use crate::foundation::collections::{EntityId, EntityMap};
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::pool::PoolMember;
use crate::scene::{EngineHost, EntityFlags, EntityRecord, Prototype, PrototypeKey};
use std::collections::HashMap;

/// Counters for monitoring entity churn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Entities created from prototypes
    pub instantiated: u64,
    /// Entities destroyed, children included
    pub destroyed: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingDestroy {
    entity: EntityId,
    remaining: f32,
}

/// Entity store with a prototype library and a delayed-destroy queue
#[derive(Debug, Default)]
pub struct SceneWorld {
    entities: EntityMap<EntityRecord>,
    prototypes: HashMap<PrototypeKey, Prototype>,
    pending_destroy: Vec<PendingDestroy>,
    stats: WorldStats,
}

impl SceneWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a prototype in the library
    pub fn register_prototype(&mut self, prototype: Prototype) {
        log::debug!("Registered prototype '{}'", prototype.key);
        self.prototypes.insert(prototype.key.clone(), prototype);
    }

    /// Create a plain active entity that no pool knows about
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        self.entities.insert(EntityRecord::new(name, EntityFlags::ACTIVE))
    }

    /// Advance delayed destroys by `delta_time` seconds
    ///
    /// Returns the number of scheduled destroys that fired.
    pub fn update(&mut self, delta_time: f32) -> usize {
        let mut due = Vec::new();
        self.pending_destroy.retain_mut(|pending| {
            pending.remaining -= delta_time;
            if pending.remaining <= 0.0 {
                due.push(pending.entity);
                false
            } else {
                true
            }
        });

        due.into_iter().filter(|&entity| self.destroy(entity)).count()
    }

    /// Borrow an entity record
    pub fn entity(&self, entity: EntityId) -> Option<&EntityRecord> {
        self.entities.get(entity)
    }

    /// Parent of an entity
    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.entities.get(entity).and_then(|record| record.parent)
    }

    /// Current local transform
    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.entities.get(entity).map(|record| record.transform)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of destroys still waiting on their timer
    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    /// Churn counters
    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    fn detach(&mut self, entity: EntityId) {
        let Some(parent) = self.entities.get_mut(entity).and_then(|record| record.parent.take()) else {
            return;
        };
        if let Some(parent_record) = self.entities.get_mut(parent) {
            parent_record.children.retain(|&child| child != entity);
        }
    }

    fn is_ancestor(&self, ancestor: EntityId, mut entity: EntityId) -> bool {
        while let Some(parent) = self.parent(entity) {
            if parent == ancestor {
                return true;
            }
            entity = parent;
        }
        false
    }
}

impl EngineHost for SceneWorld {
    fn prototype(&self, key: &PrototypeKey) -> Option<&Prototype> {
        self.prototypes.get(key)
    }

    fn instantiate(&mut self, key: &PrototypeKey) -> Option<EntityId> {
        let prototype = self.prototypes.get(key)?;

        let mut record = EntityRecord::new(format!("{} (instance)", prototype.key), EntityFlags::ACTIVE);
        record.prototype = Some(prototype.key.clone());
        record.transform = Transform::identity().with_scale(prototype.scale);

        self.stats.instantiated += 1;
        Some(self.entities.insert(record))
    }

    fn create_group(&mut self, name: &str) -> EntityId {
        self.entities.insert(EntityRecord::new(name, EntityFlags::ACTIVE | EntityFlags::GROUP))
    }

    fn destroy(&mut self, entity: EntityId) -> bool {
        if !self.entities.contains_key(entity) {
            return false;
        }
        self.detach(entity);

        let mut stack = vec![entity];
        while let Some(next) = stack.pop() {
            if let Some(record) = self.entities.remove(next) {
                stack.extend(record.children);
                self.stats.destroyed += 1;
            }
        }
        true
    }

    fn destroy_delayed(&mut self, entity: EntityId, delay: f32) -> bool {
        if !delay.is_finite() || delay <= 0.0 {
            return self.destroy(entity);
        }
        let Some(record) = self.entities.get_mut(entity) else {
            return false;
        };
        if !record.flags.contains(EntityFlags::PENDING_DESTROY) {
            record.flags.insert(EntityFlags::PENDING_DESTROY);
            self.pending_destroy.push(PendingDestroy { entity, remaining: delay });
        }
        true
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    fn children(&self, entity: EntityId) -> &[EntityId] {
        self.entities.get(entity).map(|record| record.children.as_slice()).unwrap_or_default()
    }

    fn is_active(&self, entity: EntityId) -> bool {
        self.entities.get(entity).is_some_and(EntityRecord::is_active)
    }

    fn set_active(&mut self, entity: EntityId, active: bool) {
        if let Some(record) = self.entities.get_mut(entity) {
            record.flags.set(EntityFlags::ACTIVE, active);
        }
    }

    fn set_parent(&mut self, entity: EntityId, parent: Option<EntityId>) {
        if !self.entities.contains_key(entity) {
            return;
        }
        if let Some(parent) = parent {
            if parent == entity || !self.entities.contains_key(parent) || self.is_ancestor(entity, parent) {
                log::warn!("Rejected reparent of {:?} under {:?}", entity, parent);
                return;
            }
        }
        if self.parent(entity) == parent {
            return;
        }

        self.detach(entity);
        if let Some(parent) = parent {
            if let Some(parent_record) = self.entities.get_mut(parent) {
                parent_record.children.push(entity);
            }
            if let Some(record) = self.entities.get_mut(entity) {
                record.parent = Some(parent);
            }
        }
    }

    fn set_pose(&mut self, entity: EntityId, position: Vec3, rotation: Quat) {
        if let Some(record) = self.entities.get_mut(entity) {
            record.transform.position = position;
            record.transform.rotation = rotation;
        }
    }

    fn attach_member(&mut self, entity: EntityId, member: PoolMember) {
        if let Some(record) = self.entities.get_mut(entity) {
            record.member = Some(member);
        }
    }

    fn member(&self, entity: EntityId) -> Option<&PoolMember> {
        self.entities.get(entity).and_then(|record| record.member.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_bullet() -> (SceneWorld, PrototypeKey) {
        let mut world = SceneWorld::new();
        world.register_prototype(Prototype::new("bullet").with_scale(Vec3::new(0.5, 0.5, 0.5)));
        (world, PrototypeKey::from("bullet"))
    }

    #[test]
    fn test_instantiate_uses_prototype_scale() {
        let (mut world, key) = world_with_bullet();
        let entity = world.instantiate(&key).expect("Should instantiate");

        let record = world.entity(entity).expect("Should exist");
        assert!(record.is_active());
        assert_eq!(record.prototype.as_ref(), Some(&key));
        assert_eq!(record.transform.scale, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(world.stats().instantiated, 1);
    }

    #[test]
    fn test_unknown_prototype_is_not_instantiated() {
        let mut world = SceneWorld::new();
        assert!(world.instantiate(&PrototypeKey::from("ghost")).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_destroyed_handle_stays_dead_after_slot_reuse() {
        let (mut world, key) = world_with_bullet();
        let first = world.instantiate(&key).expect("Should instantiate");
        assert!(world.destroy(first));

        let second = world.instantiate(&key).expect("Should instantiate");
        assert!(!world.is_alive(first));
        assert!(world.is_alive(second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_destroy_removes_children() {
        let (mut world, key) = world_with_bullet();
        let group = world.create_group("bullet Pool");
        let child = world.instantiate(&key).expect("Should instantiate");
        world.set_parent(child, Some(group));

        assert!(world.destroy(group));
        assert!(!world.is_alive(child));
        assert_eq!(world.stats().destroyed, 2);
    }

    #[test]
    fn test_reparent_moves_child_between_parents() {
        let mut world = SceneWorld::new();
        let a = world.create_group("a");
        let b = world.create_group("b");
        let child = world.create_entity("child");

        world.set_parent(child, Some(a));
        world.set_parent(child, Some(b));

        assert_eq!(world.parent(child), Some(b));
        assert!(world.entity(a).expect("a").children.is_empty());
        assert_eq!(world.entity(b).expect("b").children, vec![child]);
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut world = SceneWorld::new();
        let root = world.create_group("root");
        let leaf = world.create_entity("leaf");
        world.set_parent(leaf, Some(root));

        world.set_parent(root, Some(leaf));
        assert_eq!(world.parent(root), None);
    }

    #[test]
    fn test_delayed_destroy_fires_after_timer() {
        let mut world = SceneWorld::new();
        let entity = world.create_entity("debris");

        assert!(world.destroy_delayed(entity, 1.0));
        assert_eq!(world.update(0.5), 0);
        assert!(world.is_alive(entity));

        assert_eq!(world.update(0.6), 1);
        assert!(!world.is_alive(entity));
        assert_eq!(world.pending_destroy_count(), 0);
    }

    #[test]
    fn test_non_finite_delay_destroys_immediately() {
        let mut world = SceneWorld::new();
        let entity = world.create_entity("debris");

        assert!(world.destroy_delayed(entity, f32::NAN));
        assert!(!world.is_alive(entity));
        assert_eq!(world.pending_destroy_count(), 0);
    }

    #[test]
    fn test_children_lists_direct_children() {
        let mut world = SceneWorld::new();
        let group = world.create_group("group");
        let a = world.create_entity("a");
        let b = world.create_entity("b");
        world.set_parent(a, Some(group));
        world.set_parent(b, Some(group));

        assert_eq!(world.children(group), &[a, b]);
        world.destroy(a);
        assert_eq!(world.children(group), &[b]);
        assert!(world.children(a).is_empty());
    }

    #[test]
    fn test_zero_delay_destroys_immediately() {
        let mut world = SceneWorld::new();
        let entity = world.create_entity("debris");
        assert!(world.destroy_delayed(entity, 0.0));
        assert!(!world.is_alive(entity));
    }
}
