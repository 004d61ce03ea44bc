//! Pool registry
//!
//! Owns one [`Pool`] per prototype key and routes spawn/despawn requests
//! through its [`SpawnAuthority`]. Pools are created lazily the first time a
//! key is used.
//!
//! # Usage
//!
//! ```rust
//! use prefab_pool::prelude::*;
//!
//! let mut world = SceneWorld::new();
//! world.register_prototype(Prototype::new("bullet"));
//!
//! let mut pools = PoolRegistry::new();
//! let key = PrototypeKey::from("bullet");
//! let bullet = pools.spawn(&mut world, &key, Vec3::zeros(), Quat::identity())?;
//! pools.despawn(&mut world, bullet)?;
//! assert_eq!(pools.pool(&key).map(Pool::inactive_len), Some(1));
//! # Ok::<(), PoolError>(())
//! ```

use crate::config::PoolConfig;
use crate::foundation::collections::EntityId;
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::pool::{LocalAuthority, Pool, PoolError, PoolResult, SpawnAuthority};
use crate::scene::{EngineHost, PrototypeKey};
use std::collections::HashMap;

/// What despawn did with an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Despawned {
    /// Returned to the pool keyed by this prototype
    Recycled(PrototypeKey),
    /// Not pool-managed; handed to the host's delayed destroy
    Destroyed,
}

/// Totals across every pool in a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of pools
    pub pools: usize,
    /// Entries currently on inactive stacks
    pub inactive: usize,
    /// Instances created from prototypes
    pub instantiated: u64,
    /// Acquisitions served from inactive stacks
    pub reused: u64,
    /// Instances returned to pools
    pub released: u64,
    /// Stale handles dropped during acquisition
    pub stale_discarded: u64,
}

/// Mapping from prototype key to pool, guarded by a spawn authority
#[derive(Debug)]
pub struct PoolRegistry<A: SpawnAuthority = LocalAuthority> {
    pools: HashMap<PrototypeKey, Pool>,
    config: PoolConfig,
    authority: A,
}

impl PoolRegistry<LocalAuthority> {
    /// Create a single-process registry with default settings
    pub fn new() -> Self {
        Self::with_authority(LocalAuthority)
    }
}

impl Default for PoolRegistry<LocalAuthority> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SpawnAuthority> PoolRegistry<A> {
    /// Create a registry with default settings and the given authority
    pub fn with_authority(authority: A) -> Self {
        Self::from_config(PoolConfig::default(), authority)
    }

    /// Create a registry from explicit settings
    pub fn from_config(config: PoolConfig, authority: A) -> Self {
        Self {
            pools: HashMap::new(),
            config,
            authority,
        }
    }

    /// Create the pool for `key` if it does not exist yet
    ///
    /// `capacity` defaults to [`PoolConfig::default_capacity`]. Calling this
    /// for a key that already has a pool changes nothing.
    pub fn init_pool<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: &PrototypeKey,
        capacity: Option<usize>,
    ) -> PoolResult<&mut Pool> {
        if !self.pools.contains_key(key) {
            if host.prototype(key).is_none() {
                return Err(PoolError::UnknownPrototype(key.clone()));
            }
            let capacity = capacity.unwrap_or(self.config.default_capacity);
            let group_name = format!("{}{}", key, self.config.group_name_suffix);
            let pool = Pool::new(host, key.clone(), capacity, group_name);
            self.pools.insert(key.clone(), pool);
        }
        self.pools
            .get_mut(key)
            .ok_or_else(|| PoolError::UnknownPrototype(key.clone()))
    }

    /// Spawn an instance of `key` at the given pose
    pub fn spawn<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: &PrototypeKey,
        position: Vec3,
        rotation: Quat,
    ) -> PoolResult<EntityId> {
        self.ensure_authority("spawn")?;

        let transform = Transform::from_position_rotation(position, rotation);
        if !transform.is_finite() {
            return Err(PoolError::InvalidPose {
                reason: format!("non-finite pose for '{}': {:?}", key, transform),
            });
        }

        let prototype = host
            .prototype(key)
            .cloned()
            .ok_or_else(|| PoolError::UnknownPrototype(key.clone()))?;
        self.authority.check_prototype(&prototype)?;

        let entity = self.acquire(host, key, position, rotation)?;
        self.authority
            .on_spawned(entity, &prototype, transform.with_scale(prototype.scale));
        Ok(entity)
    }

    /// Return a pooled entity to its pool, or destroy an unpooled one
    pub fn despawn<H: EngineHost + ?Sized>(&mut self, host: &mut H, entity: EntityId) -> PoolResult<Despawned> {
        self.ensure_authority("despawn")?;

        let outcome = self.dispatch_despawn(host, entity)?;
        if matches!(outcome, Despawned::Recycled(_)) {
            self.authority.on_despawned(entity);
        }
        Ok(outcome)
    }

    /// Instantiate `count` instances of `key` ahead of time
    pub fn preload<H: EngineHost + ?Sized>(&mut self, host: &mut H, key: &PrototypeKey, count: usize) -> PoolResult<()> {
        self.init_pool(host, key, Some(count.max(self.config.default_capacity)))?
            .preload(host, count)
    }

    /// Destroy every pool, its group and all instances parented under it
    ///
    /// Instances still in use are reported to the authority as despawned
    /// before they are destroyed. Returns the number of inactive instances
    /// destroyed.
    pub fn clear<H: EngineHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut destroyed = 0;
        for (_, pool) in self.pools.drain() {
            for entity in pool.outstanding(&*host) {
                self.authority.on_despawned(entity);
            }
            destroyed += pool.destroy(host);
        }
        log::info!("Cleared {} registry: {} inactive instances destroyed", self.authority.name(), destroyed);
        destroyed
    }

    /// Pool for `key`, if one has been created
    pub fn pool(&self, key: &PrototypeKey) -> Option<&Pool> {
        self.pools.get(key)
    }

    /// Whether a pool exists for `key`
    pub fn contains(&self, key: &PrototypeKey) -> bool {
        self.pools.contains_key(key)
    }

    /// Keys of all existing pools
    pub fn keys(&self) -> impl Iterator<Item = &PrototypeKey> {
        self.pools.keys()
    }

    /// Number of pools
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pool has been created yet
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Registry settings
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Spawn authority
    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Mutable spawn authority
    pub fn authority_mut(&mut self) -> &mut A {
        &mut self.authority
    }

    /// Totals across all pools
    pub fn stats(&self) -> RegistryStats {
        self.pools.values().fold(
            RegistryStats {
                pools: self.pools.len(),
                ..RegistryStats::default()
            },
            |mut totals, pool| {
                let stats = pool.stats();
                totals.inactive += pool.inactive_len();
                totals.instantiated += stats.instantiated;
                totals.reused += stats.reused;
                totals.released += stats.released;
                totals.stale_discarded += stats.stale_discarded;
                totals
            },
        )
    }

    /// Acquire from the pool for `key` without consulting the authority
    pub(crate) fn acquire<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: &PrototypeKey,
        position: Vec3,
        rotation: Quat,
    ) -> PoolResult<EntityId> {
        self.init_pool(host, key, None)?.acquire(host, position, rotation)
    }

    /// Route `entity` to its owning pool by membership marker
    pub(crate) fn dispatch_despawn<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        entity: EntityId,
    ) -> PoolResult<Despawned> {
        if !host.is_alive(entity) {
            return Err(PoolError::EntityNotFound(entity));
        }

        let Some(key) = host.member(entity).map(|member| member.prototype.clone()) else {
            return Ok(self.destroy_untracked(host, entity));
        };
        let Some(pool) = self.pools.get_mut(&key) else {
            log::warn!("Entity {:?} names pool '{}' unknown to this registry, destroying it", entity, key);
            return Ok(self.destroy_untracked(host, entity));
        };

        pool.release(host, entity)?;
        Ok(Despawned::Recycled(key))
    }

    fn destroy_untracked<H: EngineHost + ?Sized>(&self, host: &mut H, entity: EntityId) -> Despawned {
        log::debug!(
            "Entity {:?} is not pooled, destroying in {}s",
            entity,
            self.config.untracked_destroy_delay
        );
        host.destroy_delayed(entity, self.config.untracked_destroy_delay);
        Despawned::Destroyed
    }

    fn ensure_authority(&self, operation: &'static str) -> PoolResult<()> {
        if self.authority.may_spawn() {
            Ok(())
        } else {
            log::error!("Cannot {}: {} authority does not permit it on this process", operation, self.authority.name());
            Err(PoolError::NotAuthority { operation })
        }
    }
}
