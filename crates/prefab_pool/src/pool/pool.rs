//! Single-prototype pool
//!
//! Holds the inactive instances of one prototype in a LIFO stack. Handles on
//! the stack are generation-checked against the host before reuse, so an
//! instance destroyed behind the pool's back is skipped instead of revived.

use crate::foundation::collections::EntityId;
use crate::foundation::math::{Quat, Vec3};
use crate::pool::{PoolError, PoolMember, PoolResult};
use crate::scene::{EngineHost, PrototypeKey};

/// Counters for one pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances created from the prototype
    pub instantiated: u64,
    /// Acquisitions served from the inactive stack
    pub reused: u64,
    /// Instances returned to the stack
    pub released: u64,
    /// Stack entries dropped because their entity was destroyed externally
    pub stale_discarded: u64,
}

/// Pool of inactive instances for one prototype
#[derive(Debug)]
pub struct Pool {
    key: PrototypeKey,
    group_name: String,
    group: EntityId,
    inactive: Vec<EntityId>,
    stats: PoolStats,
}

impl Pool {
    /// Create an empty pool and its group entity
    pub fn new<H: EngineHost + ?Sized>(
        host: &mut H,
        key: PrototypeKey,
        capacity: usize,
        group_name: String,
    ) -> Self {
        let group = host.create_group(&group_name);
        log::info!("Created pool '{}' with initial capacity {}", key, capacity);

        Self {
            key,
            group_name,
            group,
            inactive: Vec::with_capacity(capacity),
            stats: PoolStats::default(),
        }
    }

    /// Hand out an instance posed at `position`/`rotation`
    ///
    /// Reuses the most recently released live instance, otherwise
    /// instantiates a new one from the prototype.
    pub fn acquire<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: Vec3,
        rotation: Quat,
    ) -> PoolResult<EntityId> {
        let entity = if let Some(entity) = self.pop_live(&*host) {
            self.stats.reused += 1;
            entity
        } else {
            let entity = host
                .instantiate(&self.key)
                .ok_or_else(|| PoolError::UnknownPrototype(self.key.clone()))?;
            host.attach_member(entity, PoolMember::new(self.key.clone()));
            self.stats.instantiated += 1;
            entity
        };

        let group = self.ensure_group(host);
        host.set_parent(entity, Some(group));
        host.set_pose(entity, position, rotation);
        host.set_active(entity, true);

        log::debug!("Acquired {:?} from pool '{}'", entity, self.key);
        Ok(entity)
    }

    /// Deactivate an instance and push it onto the inactive stack
    pub fn release<H: EngineHost + ?Sized>(&mut self, host: &mut H, entity: EntityId) -> PoolResult<()> {
        if !host.is_alive(entity) {
            return Err(PoolError::EntityNotFound(entity));
        }
        if host.member(entity).map(|member| &member.prototype) != Some(&self.key) {
            return Err(PoolError::ForeignEntity {
                entity,
                pool: self.key.clone(),
            });
        }
        if self.inactive.contains(&entity) {
            return Err(PoolError::AlreadyInactive(entity));
        }

        host.set_active(entity, false);
        let group = self.ensure_group(host);
        host.set_parent(entity, Some(group));
        self.inactive.push(entity);
        self.stats.released += 1;

        log::debug!("Released {:?} into pool '{}' ({} inactive)", entity, self.key, self.inactive.len());
        Ok(())
    }

    /// Pay instantiation up front: acquire `count` instances, then release them all
    pub fn preload<H: EngineHost + ?Sized>(&mut self, host: &mut H, count: usize) -> PoolResult<()> {
        let mut acquired = Vec::with_capacity(count);
        let mut outcome = Ok(());

        for _ in 0..count {
            match self.acquire(host, Vec3::zeros(), Quat::identity()) {
                Ok(entity) => acquired.push(entity),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }
        for entity in acquired {
            self.release(host, entity)?;
        }

        log::debug!("Preloaded {} instances into pool '{}'", count, self.key);
        outcome
    }

    /// Destroy the group and everything parented under it
    ///
    /// Returns the number of inactive instances that were still alive.
    pub fn destroy<H: EngineHost + ?Sized>(self, host: &mut H) -> usize {
        let live = self.inactive.iter().filter(|&&entity| host.is_alive(entity)).count();
        for &entity in &self.inactive {
            host.destroy(entity);
        }
        host.destroy(self.group);

        log::info!("Destroyed pool '{}' ({} inactive instances)", self.key, live);
        live
    }

    /// Acquired instances still parented under the group
    pub fn outstanding<H: EngineHost + ?Sized>(&self, host: &H) -> Vec<EntityId> {
        host.children(self.group)
            .iter()
            .copied()
            .filter(|&entity| !self.contains_inactive(entity))
            .filter(|&entity| host.member(entity).is_some_and(|member| member.prototype == self.key))
            .collect()
    }

    /// Prototype this pool serves
    pub fn key(&self) -> &PrototypeKey {
        &self.key
    }

    /// Organizational parent of this pool's instances
    pub fn group(&self) -> EntityId {
        self.group
    }

    /// Entries on the inactive stack, stale ones included
    pub fn inactive_len(&self) -> usize {
        self.inactive.len()
    }

    /// Inactive stack, bottom first
    pub fn inactive(&self) -> &[EntityId] {
        &self.inactive
    }

    /// Whether `entity` is waiting on the inactive stack
    pub fn contains_inactive(&self, entity: EntityId) -> bool {
        self.inactive.contains(&entity)
    }

    /// Allocated stack capacity
    pub fn capacity(&self) -> usize {
        self.inactive.capacity()
    }

    /// Pool counters
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    fn pop_live<H: EngineHost + ?Sized>(&mut self, host: &H) -> Option<EntityId> {
        while let Some(entity) = self.inactive.pop() {
            if host.is_alive(entity) {
                return Some(entity);
            }
            self.stats.stale_discarded += 1;
            log::debug!("Discarded stale handle {:?} from pool '{}'", entity, self.key);
        }
        None
    }

    fn ensure_group<H: EngineHost + ?Sized>(&mut self, host: &mut H) -> EntityId {
        if !host.is_alive(self.group) {
            log::warn!("Group for pool '{}' was destroyed, recreating it", self.key);
            self.group = host.create_group(&self.group_name);
        }
        self.group
    }
}
