//! Demo configuration

use prefab_pool::config::{Config, ConfigError, PoolConfig};
use serde::{Deserialize, Serialize};

/// Frame-loop settings for the demo, with the pool settings embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Settings shared by every registry the demo creates
    pub pool: PoolConfig,
    /// Number of simulated frames per scenario
    pub frames: u32,
    /// Seconds per frame
    pub frame_time: f32,
    /// Upper bound of bullets fired per frame
    pub max_spawns_per_frame: u32,
    /// Seconds a bullet lives before it is despawned
    pub bullet_lifetime: f32,
    /// Bullets preloaded before the first frame
    pub preload: usize,
    /// Seed for the random spawn pattern
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default().with_untracked_destroy_delay(0.5),
            frames: 240,
            frame_time: 1.0 / 60.0,
            max_spawns_per_frame: 3,
            bullet_lifetime: 1.5,
            preload: 32,
            seed: 0x0b7ec7,
        }
    }
}

impl Config for DemoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.pool.validate()?;
        if !(self.frame_time.is_finite() && self.frame_time > 0.0) {
            return Err(ConfigError::Invalid {
                field: "frame_time",
                reason: format!("expected a positive frame time, got {}", self.frame_time),
            });
        }
        Ok(())
    }
}
