//! Scene-side collaborator
//!
//! The pool never owns entities directly. It drives them through the
//! [`EngineHost`] trait: instantiate, destroy, enable/disable, parenting and
//! pose. [`SceneWorld`] is the in-process implementation used by the demo and
//! the tests.

pub mod entity;
pub mod host;
pub mod prototype;
pub mod world;

pub use entity::{EntityFlags, EntityRecord};
pub use host::EngineHost;
pub use prototype::{AssetId, ParseAssetIdError, Prototype, PrototypeKey};
pub use world::{SceneWorld, WorldStats};
