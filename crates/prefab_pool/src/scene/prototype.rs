//! Prototype definitions
//!
//! A prototype is the template every pooled instance is created from. Its key
//! selects the pool; its optional asset id is the name the network layer uses
//! for it on every peer.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a prototype and, through it, exactly one pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeKey(String);

impl PrototypeKey {
    /// Create a key from a prototype name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The prototype name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrototypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrototypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PrototypeKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 128-bit network asset identifier, written as 32 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(u128);

impl AssetId {
    /// Create an asset id from its raw value
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw value
    pub const fn value(self) -> u128 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Error returned when an asset id string is not 32 hex digits
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid asset id '{0}': expected 32 hex digits")]
pub struct ParseAssetIdError(String);

impl FromStr for AssetId {
    type Err = ParseAssetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseAssetIdError(s.to_string()));
        }
        u128::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| ParseAssetIdError(s.to_string()))
    }
}

impl TryFrom<String> for AssetId {
    type Error = ParseAssetIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.to_string()
    }
}

/// Template entity definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    /// Key selecting this prototype's pool
    pub key: PrototypeKey,
    /// Network asset id; required for networked spawning
    pub asset_id: Option<AssetId>,
    /// Scale every instance starts with
    pub scale: Vec3,
}

impl Prototype {
    /// Create a local-only prototype with unit scale
    pub fn new(key: impl Into<PrototypeKey>) -> Self {
        Self {
            key: key.into(),
            asset_id: None,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Attach a network asset id
    pub fn with_asset_id(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Set the instance scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}
