//! Network spawn authority and client-side spawn handlers

use crate::foundation::collections::EntityId;
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::network::NetworkHost;
use crate::pool::{Despawned, PoolError, PoolRegistry, PoolResult, SpawnAuthority};
use crate::scene::{AssetId, EngineHost, Prototype, PrototypeKey};

/// Authority that defers to the network layer and replicates what it spawns
#[derive(Debug, Default)]
pub struct NetworkAuthority<N: NetworkHost> {
    network: N,
}

impl<N: NetworkHost> NetworkAuthority<N> {
    /// Wrap a network layer
    pub fn new(network: N) -> Self {
        Self { network }
    }

    /// The wrapped network layer
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Mutable access to the wrapped network layer
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }
}

impl<N: NetworkHost> SpawnAuthority for NetworkAuthority<N> {
    fn name(&self) -> &'static str {
        "network"
    }

    fn may_spawn(&self) -> bool {
        self.network.is_authority()
    }

    fn check_prototype(&self, prototype: &Prototype) -> PoolResult<()> {
        match prototype.asset_id {
            Some(_) => Ok(()),
            None => Err(PoolError::MissingAssetId(prototype.key.clone())),
        }
    }

    fn on_spawned(&mut self, entity: EntityId, prototype: &Prototype, transform: Transform) {
        if let Some(asset_id) = prototype.asset_id {
            self.network.register(entity, asset_id, transform);
        }
    }

    fn on_despawned(&mut self, entity: EntityId) {
        self.network.unregister(entity);
    }
}

impl<N: NetworkHost> PoolRegistry<NetworkAuthority<N>> {
    /// Create the pool for `key` and bind its asset id to it on this peer
    ///
    /// Every peer calls this for each networked prototype so replicated spawns
    /// are rebuilt from the pool instead of instantiated fresh.
    pub fn register_spawn_handlers<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: &PrototypeKey,
    ) -> PoolResult<AssetId> {
        let asset_id = host
            .prototype(key)
            .ok_or_else(|| PoolError::UnknownPrototype(key.clone()))?
            .asset_id
            .ok_or_else(|| PoolError::MissingAssetId(key.clone()))?;

        self.init_pool(host, key, None)?;
        self.authority_mut()
            .network_mut()
            .register_spawn_handler(asset_id, key.clone());

        log::info!("Registered spawn handlers for '{}' (asset {})", key, asset_id);
        Ok(asset_id)
    }

    /// Rebuild a replicated spawn from the local pool bound to `asset_id`
    ///
    /// Runs on non-authoritative peers, so the authority check is skipped and
    /// nothing is re-registered with the network.
    pub fn spawn_remote<H: EngineHost + ?Sized>(
        &mut self,
        host: &mut H,
        asset_id: AssetId,
        position: Vec3,
        rotation: Quat,
    ) -> PoolResult<EntityId> {
        let key = self
            .authority()
            .network()
            .spawn_handler(asset_id)
            .cloned()
            .ok_or(PoolError::NoSpawnHandler(asset_id))?;

        self.acquire(host, &key, position, rotation)
    }

    /// Return a replicated entity to its local pool after the server unspawned it
    pub fn despawn_remote<H: EngineHost + ?Sized>(&mut self, host: &mut H, entity: EntityId) -> PoolResult<Despawned> {
        self.dispatch_despawn(host, entity)
    }
}
