//! Entity trait: identity that survives state changes.
//!
//! Customers, catalog entries and orders are entities: a catalog entry whose
//! quantity dropped from 5 to 3 is still the same entry.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity carries the given identifier.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
