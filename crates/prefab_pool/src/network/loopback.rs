//! In-process network layer
//!
//! Assigns net ids to registered entities and queues the resulting
//! [`ReplicationMessage`]s in an outbox that the caller drains and hands to
//! the client side, standing in for a real transport.

use crate::foundation::collections::{EntityId, EntityTable};
use crate::foundation::math::Transform;
use crate::network::{NetId, NetworkHost, ReplicationMessage};
use crate::scene::{AssetId, PrototypeKey};
use std::collections::{HashMap, VecDeque};

/// Loopback [`NetworkHost`] for one peer
#[derive(Debug, Default)]
pub struct LoopbackNetwork {
    authority: bool,
    next_net_id: u32,
    replicated: EntityTable<NetId>,
    handlers: HashMap<AssetId, PrototypeKey>,
    outbox: VecDeque<ReplicationMessage>,
}

impl LoopbackNetwork {
    /// Authoritative peer
    pub fn server() -> Self {
        Self {
            authority: true,
            ..Self::default()
        }
    }

    /// Non-authoritative peer
    pub fn client() -> Self {
        Self::default()
    }

    /// Take every queued message, oldest first
    pub fn drain(&mut self) -> Vec<ReplicationMessage> {
        self.outbox.drain(..).collect()
    }

    /// Queued message count
    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Net id of a replicated entity
    pub fn net_id(&self, entity: EntityId) -> Option<NetId> {
        self.replicated.get(entity).copied()
    }

    /// Number of entities currently replicated
    pub fn replicated_len(&self) -> usize {
        self.replicated.len()
    }

    /// Number of bound spawn handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl NetworkHost for LoopbackNetwork {
    fn is_authority(&self) -> bool {
        self.authority
    }

    fn register(&mut self, entity: EntityId, asset_id: AssetId, transform: Transform) -> NetId {
        let net_id = NetId(self.next_net_id);
        self.next_net_id = self.next_net_id.wrapping_add(1);

        if let Some(previous) = self.replicated.insert(entity, net_id) {
            log::warn!("Entity {:?} was already replicated as {}, replacing it", entity, previous);
            self.outbox.push_back(ReplicationMessage::Unspawn { net_id: previous });
        }
        self.outbox.push_back(ReplicationMessage::Spawn {
            net_id,
            asset_id,
            transform,
        });

        log::debug!("Replicating {:?} as {} (asset {})", entity, net_id, asset_id);
        net_id
    }

    fn unregister(&mut self, entity: EntityId) -> Option<NetId> {
        let net_id = self.replicated.remove(entity)?;
        self.outbox.push_back(ReplicationMessage::Unspawn { net_id });
        log::debug!("Stopped replicating {:?} ({})", entity, net_id);
        Some(net_id)
    }

    fn register_spawn_handler(&mut self, asset_id: AssetId, key: PrototypeKey) {
        log::debug!("Spawn handler for asset {} -> pool '{}'", asset_id, key);
        self.handlers.insert(asset_id, key);
    }

    fn spawn_handler(&self, asset_id: AssetId) -> Option<&PrototypeKey> {
        self.handlers.get(&asset_id)
    }
}
