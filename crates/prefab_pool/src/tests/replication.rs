//! Server-to-client replication through the loopback network

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use approx::assert_relative_eq;

    const ORB: AssetId = AssetId::new(0x0fb);
    const SHARD: AssetId = AssetId::new(0x5a7d);

    struct Peer {
        world: SceneWorld,
        pools: PoolRegistry<NetworkAuthority<LoopbackNetwork>>,
    }

    impl Peer {
        fn new(network: LoopbackNetwork) -> Self {
            let mut world = SceneWorld::new();
            world.register_prototype(Prototype::new("orb").with_asset_id(ORB));
            world.register_prototype(Prototype::new("shard").with_asset_id(SHARD).with_scale(Vec3::new(0.2, 0.2, 0.2)));

            let mut pools = PoolRegistry::with_authority(NetworkAuthority::new(network));
            for key in ["orb", "shard"] {
                pools
                    .register_spawn_handlers(&mut world, &PrototypeKey::from(key))
                    .expect("Should register handlers");
            }
            Self { world, pools }
        }

        fn outbox_over_wire(&mut self) -> Vec<ReplicationMessage> {
            self.pools
                .authority_mut()
                .network_mut()
                .drain()
                .iter()
                .map(|message| {
                    let bytes = message.to_wire().expect("Should encode");
                    ReplicationMessage::from_wire(&bytes).expect("Should decode")
                })
                .collect()
        }
    }

    #[test]
    fn test_client_mirrors_server_spawns_through_its_pool() {
        let mut server = Peer::new(LoopbackNetwork::server());
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();

        let orb = PrototypeKey::from("orb");
        let positions = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 3.0)];
        let mut spawned = Vec::new();
        for position in positions {
            spawned.push(
                server
                    .pools
                    .spawn(&mut server.world, &orb, position, Quat::identity())
                    .expect("Server should spawn"),
            );
        }

        let messages = server.outbox_over_wire();
        assert_eq!(messages.len(), 3);
        let applied = replicator
            .apply_all(&mut client.pools, &mut client.world, &messages)
            .expect("Client should apply");
        assert_eq!(applied, 3);
        assert_eq!(replicator.len(), 3);

        for (server_entity, position) in spawned.iter().zip(positions) {
            let net_id = server.pools.authority().network().net_id(*server_entity).expect("Should be replicated");
            let mirror = replicator.entity(net_id).expect("Client should mirror");
            assert!(client.world.is_active(mirror));
            assert_eq!(
                client.world.member(mirror),
                Some(&PoolMember::new(orb.clone()))
            );
            let transform = client.world.transform(mirror).expect("Should have transform");
            assert_relative_eq!(transform.position, position);
        }
    }

    #[test]
    fn test_unspawn_recycles_on_client_and_next_spawn_reuses_it() {
        let mut server = Peer::new(LoopbackNetwork::server());
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();
        let shard = PrototypeKey::from("shard");

        let first = server
            .pools
            .spawn(&mut server.world, &shard, Vec3::zeros(), Quat::identity())
            .expect("Server should spawn");
        let net_id = server.pools.authority().network().net_id(first).expect("Should be replicated");
        replicator
            .apply_all(&mut client.pools, &mut client.world, &server.outbox_over_wire())
            .expect("Client should apply");
        let mirror = replicator.entity(net_id).expect("Client should mirror");

        server.pools.despawn(&mut server.world, first).expect("Server should despawn");
        replicator
            .apply_all(&mut client.pools, &mut client.world, &server.outbox_over_wire())
            .expect("Client should apply");
        assert!(replicator.is_empty());
        assert!(!client.world.is_active(mirror));
        assert_eq!(client.pools.pool(&shard).map(Pool::inactive_len), Some(1));

        server
            .pools
            .spawn(&mut server.world, &shard, Vec3::zeros(), Quat::identity())
            .expect("Server should spawn");
        replicator
            .apply_all(&mut client.pools, &mut client.world, &server.outbox_over_wire())
            .expect("Client should apply");

        assert!(client.world.is_active(mirror));
        assert_eq!(client.world.stats().instantiated, 1);
        assert_eq!(server.world.stats().instantiated, 1);
        let scale = client.world.transform(mirror).expect("Should have transform").scale;
        assert_relative_eq!(scale, Vec3::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn test_unknown_net_id_is_reported() {
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();

        let result = replicator.apply(
            &mut client.pools,
            &mut client.world,
            &ReplicationMessage::Unspawn { net_id: NetId(404) },
        );
        assert_eq!(result, Err(PoolError::UnknownNetId(NetId(404))));
    }

    #[test]
    fn test_spawn_for_unregistered_asset_is_reported() {
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();
        let stray = AssetId::new(0xdead);

        let result = replicator.apply(
            &mut client.pools,
            &mut client.world,
            &ReplicationMessage::Spawn {
                net_id: NetId(1),
                asset_id: stray,
                transform: Transform::identity(),
            },
        );
        assert_eq!(result, Err(PoolError::NoSpawnHandler(stray)));
        assert!(replicator.is_empty());
    }

    #[test]
    fn test_server_clear_unspawns_client_mirrors() {
        let mut server = Peer::new(LoopbackNetwork::server());
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();
        let orb = PrototypeKey::from("orb");
        let shard = PrototypeKey::from("shard");

        let mut spawned = Vec::new();
        for key in [&orb, &orb, &shard] {
            spawned.push(
                server
                    .pools
                    .spawn(&mut server.world, key, Vec3::zeros(), Quat::identity())
                    .expect("Server should spawn"),
            );
        }
        server.pools.despawn(&mut server.world, spawned[0]).expect("Server should despawn");
        replicator
            .apply_all(&mut client.pools, &mut client.world, &server.outbox_over_wire())
            .expect("Client should apply");
        assert_eq!(replicator.len(), 2);

        server.pools.clear(&mut server.world);
        let network = server.pools.authority().network();
        assert_eq!(network.replicated_len(), 0);
        assert!(spawned.iter().all(|&entity| network.net_id(entity).is_none()));
        assert!(server.world.is_empty());

        let teardown = server.outbox_over_wire();
        assert_eq!(teardown.len(), 2);
        assert!(teardown.iter().all(|message| matches!(message, ReplicationMessage::Unspawn { .. })));
        replicator
            .apply_all(&mut client.pools, &mut client.world, &teardown)
            .expect("Client should apply");

        assert!(replicator.is_empty());
        assert_eq!(client.pools.stats().inactive, 3);
    }

    #[test]
    fn test_client_clear_after_session_ends() {
        let mut server = Peer::new(LoopbackNetwork::server());
        let mut client = Peer::new(LoopbackNetwork::client());
        let mut replicator = ClientReplicator::new();
        let orb = PrototypeKey::from("orb");

        for _ in 0..4 {
            server
                .pools
                .spawn(&mut server.world, &orb, Vec3::zeros(), Quat::identity())
                .expect("Server should spawn");
        }
        replicator
            .apply_all(&mut client.pools, &mut client.world, &server.outbox_over_wire())
            .expect("Client should apply");

        client.pools.clear(&mut client.world);
        assert!(client.pools.is_empty());
        assert!(client.world.is_empty());
    }
}
