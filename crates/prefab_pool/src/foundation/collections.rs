//! Specialized collection types

pub use slotmap::{SlotMap, SecondaryMap, Key};

slotmap::new_key_type! {
    /// Generation-counted handle to a scene entity
    ///
    /// A handle to a destroyed entity never resolves again, even after its slot
    /// has been reused by a newer entity.
    pub struct EntityId;
}

/// Handle-based map keyed by entity handles
pub type EntityMap<T> = SlotMap<EntityId, T>;

/// Sparse per-entity side table
pub type EntityTable<T> = SecondaryMap<EntityId, T>;
