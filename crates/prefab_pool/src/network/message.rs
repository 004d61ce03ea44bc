//! Replication messages and their text wire form

use crate::foundation::math::Transform;
use crate::network::NetId;
use crate::scene::AssetId;
use serde::{Deserialize, Serialize};

/// Server-to-client replication traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplicationMessage {
    /// An entity built from `asset_id` appeared at `transform`
    Spawn {
        /// Id the entity is known by
        net_id: NetId,
        /// Asset the entity was spawned from
        asset_id: AssetId,
        /// Pose at spawn time
        transform: Transform,
    },
    /// The entity was despawned on the server
    Unspawn {
        /// Id the entity was known by
        net_id: NetId,
    },
}

/// Wire encoding errors
#[derive(thiserror::Error, Debug)]
pub enum WireError {
    /// Message could not be encoded
    #[error("encode error: {0}")]
    Encode(String),

    /// Bytes did not hold a valid message
    #[error("decode error: {0}")]
    Decode(String),
}

impl ReplicationMessage {
    /// Net id this message is about
    pub fn net_id(&self) -> NetId {
        match self {
            Self::Spawn { net_id, .. } | Self::Unspawn { net_id } => *net_id,
        }
    }

    /// Encode as compact RON bytes
    pub fn to_wire(&self) -> Result<Vec<u8>, WireError> {
        ron::to_string(self)
            .map(String::into_bytes)
            .map_err(|e| WireError::Encode(e.to_string()))
    }

    /// Decode from RON bytes
    pub fn from_wire(bytes: &[u8]) -> Result<Self, WireError> {
        let text = std::str::from_utf8(bytes).map_err(|e| WireError::Decode(e.to_string()))?;
        ron::from_str(text).map_err(|e| WireError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_spawn_message_survives_wire() {
        let message = ReplicationMessage::Spawn {
            net_id: NetId(7),
            asset_id: AssetId::new(0xfeed),
            transform: Transform::identity().with_scale(Vec3::new(2.0, 2.0, 2.0)),
        };
        let bytes = message.to_wire().expect("Should encode");
        assert_eq!(ReplicationMessage::from_wire(&bytes).expect("Should decode"), message);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(matches!(
            ReplicationMessage::from_wire(b"Spawn(oops"),
            Err(WireError::Decode(_))
        ));
        assert!(ReplicationMessage::from_wire(&[0xff, 0xfe]).is_err());
    }
}
