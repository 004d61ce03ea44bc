//! Configuration system
//!
//! Pool settings are plain serde structs that can be loaded from and saved to
//! TOML or RON files; the format is picked from the file extension.

pub use serde::{Serialize, Deserialize};
use std::path::Path;

/// Initial stack capacity used when a pool is created without an explicit one
pub const DEFAULT_POOL_CAPACITY: usize = 3;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file, falling back to defaults when the file is missing
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                    .map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but is out of range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Settings shared by every pool in a registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Initial inactive-stack capacity for lazily created pools
    pub default_capacity: usize,
    /// Delay in seconds before an untracked entity passed to despawn is destroyed
    pub untracked_destroy_delay: f32,
    /// Appended to the prototype key to name each pool's group entity
    pub group_name_suffix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_POOL_CAPACITY,
            untracked_destroy_delay: 0.0,
            group_name_suffix: " Pool".to_string(),
        }
    }
}

impl Config for PoolConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.untracked_destroy_delay.is_finite() || self.untracked_destroy_delay < 0.0 {
            return Err(ConfigError::Invalid {
                field: "untracked_destroy_delay",
                reason: format!("expected a finite, non-negative delay, got {}", self.untracked_destroy_delay),
            });
        }
        Ok(())
    }
}

impl PoolConfig {
    /// Set the default initial capacity
    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Set the fallback destroy delay for untracked entities
    pub fn with_untracked_destroy_delay(mut self, seconds: f32) -> Self {
        self.untracked_destroy_delay = seconds.max(0.0);
        self
    }
}
