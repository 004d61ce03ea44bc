//! Pooling demo
//!
//! Runs two headless frame loops against the scene world: a local shooter
//! that recycles bullets, and a server/client pair that replicates pooled
//! orbs over the loopback network.
//!
//! Usage: `pool_demo [config.toml|config.ron]`

mod config;

use config::DemoConfig;
use prefab_pool::prelude::*;
use rand::prelude::*;

const BULLET_ASSET: AssetId = AssetId::new(0x0000_0000_0000_0000_0000_0000_0000_b111);
const ORB_ASSET: AssetId = AssetId::new(0x0000_0000_0000_0000_0000_0000_0000_0a0b);

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
}

struct Projectile {
    entity: EntityId,
    age: f32,
}

fn build_world() -> SceneWorld {
    let mut world = SceneWorld::new();
    world.register_prototype(Prototype::new("bullet").with_asset_id(BULLET_ASSET).with_scale(Vec3::new(0.1, 0.1, 0.4)));
    world.register_prototype(Prototype::new("orb").with_asset_id(ORB_ASSET));
    world
}

fn random_pose(rng: &mut StdRng) -> (Vec3, Quat) {
    let position = Vec3::new(rng.gen_range(-10.0..10.0), 0.0, rng.gen_range(-10.0..10.0));
    let heading = Quat::from_axis_angle(&Vec3::y_axis(), rng.gen_range(0.0..std::f32::consts::TAU));
    (position, heading)
}

/// Advance projectile ages and hand back the ones that expired
fn expire(projectiles: &mut Vec<Projectile>, frame_time: f32, lifetime: f32) -> Vec<EntityId> {
    let mut expired = Vec::new();
    projectiles.retain_mut(|projectile| {
        projectile.age += frame_time;
        if projectile.age >= lifetime {
            expired.push(projectile.entity);
            false
        } else {
            true
        }
    });
    expired
}

fn run_local(config: &DemoConfig, rng: &mut StdRng) -> Result<(), DemoError> {
    log::info!("Local scenario: {} frames", config.frames);

    let mut world = build_world();
    let mut pools = PoolRegistry::from_config(config.pool.clone(), LocalAuthority);
    let bullet = PrototypeKey::from("bullet");
    pools.preload(&mut world, &bullet, config.preload)?;

    let mut projectiles = Vec::new();
    for frame in 0..config.frames {
        for _ in 0..rng.gen_range(0..=config.max_spawns_per_frame) {
            let (position, heading) = random_pose(rng);
            let entity = pools.spawn(&mut world, &bullet, position, heading)?;
            projectiles.push(Projectile { entity, age: 0.0 });
        }

        for entity in expire(&mut projectiles, config.frame_time, config.bullet_lifetime) {
            pools.despawn(&mut world, entity)?;
        }

        // Impact debris is never pooled; despawn falls back to a delayed destroy.
        if frame % 30 == 0 {
            let debris = world.create_entity(format!("debris {frame}"));
            pools.despawn(&mut world, debris)?;
        }

        world.update(config.frame_time);
    }

    let stats = pools.stats();
    log::info!(
        "Local scenario done: {} live bullets, {} instantiated, {} reused, {} released, {} inactive",
        projectiles.len(),
        stats.instantiated,
        stats.reused,
        stats.released,
        stats.inactive
    );

    let destroyed = pools.clear(&mut world);
    log::info!("Local teardown destroyed {} pooled instances, {} entities remain", destroyed, world.len());
    Ok(())
}

fn run_networked(config: &DemoConfig, rng: &mut StdRng) -> Result<(), DemoError> {
    log::info!("Networked scenario: {} frames", config.frames);

    let orb = PrototypeKey::from("orb");

    let mut server_world = build_world();
    let mut server = PoolRegistry::from_config(config.pool.clone(), NetworkAuthority::new(LoopbackNetwork::server()));
    server.register_spawn_handlers(&mut server_world, &orb)?;

    let mut client_world = build_world();
    let mut client = PoolRegistry::from_config(config.pool.clone(), NetworkAuthority::new(LoopbackNetwork::client()));
    client.register_spawn_handlers(&mut client_world, &orb)?;
    let mut replicator = ClientReplicator::new();

    // Clients may not spawn on their own; this is logged and refused.
    if let Err(err) = client.spawn(&mut client_world, &orb, Vec3::zeros(), Quat::identity()) {
        log::info!("Client spawn refused as expected: {}", err);
    }

    let mut orbs = Vec::new();
    for _ in 0..config.frames {
        if rng.gen_bool(0.25) {
            let (position, heading) = random_pose(rng);
            let entity = server.spawn(&mut server_world, &orb, position, heading)?;
            orbs.push(Projectile { entity, age: 0.0 });
        }
        for entity in expire(&mut orbs, config.frame_time, config.bullet_lifetime * 2.0) {
            server.despawn(&mut server_world, entity)?;
        }

        let messages = server.authority_mut().network_mut().drain();
        replicator.apply_all(&mut client, &mut client_world, &messages)?;

        server_world.update(config.frame_time);
        client_world.update(config.frame_time);
    }

    log::info!(
        "Networked scenario done: server {} live / {} instantiated, client {} mirrored / {} instantiated",
        orbs.len(),
        server.stats().instantiated,
        replicator.len(),
        client.stats().instantiated
    );
    Ok(())
}

fn main() -> Result<(), DemoError> {
    prefab_pool::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting prefab pool demo");

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };
    log::debug!("Demo config: {:?}", config);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = run_local(&config, &mut rng).and_then(|()| run_networked(&config, &mut rng));

    match result {
        Ok(()) => {
            log::info!("Prefab pool demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Prefab pool demo failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_returns_only_old_projectiles() {
        let mut world = build_world();
        let young = world.create_entity("young");
        let old = world.create_entity("old");
        let mut projectiles = vec![
            Projectile { entity: young, age: 0.0 },
            Projectile { entity: old, age: 0.9 },
        ];

        assert_eq!(expire(&mut projectiles, 0.2, 1.0), vec![old]);
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/demo.toml");
        let config = DemoConfig::load_from_file(path).expect("Shipped config should load");
        assert_eq!(config.frames, 600);
        assert_eq!(config.pool.default_capacity, 8);
    }

    #[test]
    fn test_unusable_timings_rejected() {
        let stalled = DemoConfig {
            frame_time: 0.0,
            ..DemoConfig::default()
        };
        assert!(matches!(stalled.validate(), Err(ConfigError::Invalid { field: "frame_time", .. })));

        let mut never_destroys = DemoConfig::default();
        never_destroys.pool.untracked_destroy_delay = f32::NAN;
        assert!(matches!(
            never_destroys.validate(),
            Err(ConfigError::Invalid { field: "untracked_destroy_delay", .. })
        ));
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_short_demo_runs_clean() {
        let config = DemoConfig {
            frames: 120,
            preload: 4,
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(config.seed);
        run_local(&config, &mut rng).expect("Local scenario should run");
        run_networked(&config, &mut rng).expect("Networked scenario should run");
    }
}
