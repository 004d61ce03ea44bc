//! Client-side application of replication traffic

use crate::foundation::collections::EntityId;
use crate::network::{NetId, NetworkAuthority, NetworkHost, ReplicationMessage};
use crate::pool::{PoolError, PoolRegistry, PoolResult};
use crate::scene::EngineHost;
use std::collections::HashMap;

/// Tracks which local entity stands in for each replicated net id
#[derive(Debug, Default)]
pub struct ClientReplicator {
    entities: HashMap<NetId, EntityId>,
}

impl ClientReplicator {
    /// Create an empty replicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one message through the client's pools
    pub fn apply<N, H>(
        &mut self,
        pools: &mut PoolRegistry<NetworkAuthority<N>>,
        host: &mut H,
        message: &ReplicationMessage,
    ) -> PoolResult<()>
    where
        N: NetworkHost,
        H: EngineHost + ?Sized,
    {
        match message {
            ReplicationMessage::Spawn { net_id, asset_id, transform } => {
                let entity = pools.spawn_remote(host, *asset_id, transform.position, transform.rotation)?;
                if let Some(previous) = self.entities.insert(*net_id, entity) {
                    log::warn!("Net id {} respawned, recycling previous {:?}", net_id, previous);
                    if host.is_alive(previous) {
                        pools.despawn_remote(host, previous)?;
                    }
                }
                log::debug!("Replicated spawn {} -> {:?}", net_id, entity);
            }
            ReplicationMessage::Unspawn { net_id } => {
                let entity = self
                    .entities
                    .remove(net_id)
                    .ok_or(PoolError::UnknownNetId(*net_id))?;
                if host.is_alive(entity) {
                    pools.despawn_remote(host, entity)?;
                } else {
                    log::debug!("Replicated unspawn {} found {:?} already destroyed", net_id, entity);
                }
            }
        }
        Ok(())
    }

    /// Apply messages in order, stopping at the first failure
    pub fn apply_all<'a, N, H>(
        &mut self,
        pools: &mut PoolRegistry<NetworkAuthority<N>>,
        host: &mut H,
        messages: impl IntoIterator<Item = &'a ReplicationMessage>,
    ) -> PoolResult<usize>
    where
        N: NetworkHost,
        H: EngineHost + ?Sized,
    {
        let mut applied = 0;
        for message in messages {
            self.apply(pools, host, message)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Local entity for a net id
    pub fn entity(&self, net_id: NetId) -> Option<EntityId> {
        self.entities.get(&net_id).copied()
    }

    /// Number of replicated entities currently mirrored
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is mirrored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
