//! Entity identifiers and their lifecycle.
//!
//! An [`Entity`] is nothing but an integer in `[0, max_entities)`. It carries no data of its own;
//! everything about it lives in the component stores, and the set of component types it carries
//! is tracked by its [`Signature`](crate::ecs::Signature) in the entity [`Registry`].
//!
//! # Recycling
//!
//! The registry hands out ids from a FIFO pool seeded with every id in ascending order. A
//! destroyed id goes to the back of the pool, so it is only reused once every id freed before it
//! has been handed out again.
//!
//! There is no generation counter. Once an id is recycled, any handle kept from its previous
//! life refers to the new entity:
//!
//! ```rust,ignore
//! let a = registry.create();  // Entity(0)
//! registry.destroy(a);
//! // ... after the pool cycles back around ...
//! let b = registry.create();  // Entity(0) again, indistinguishable from `a`
//! ```

mod registry;

use std::fmt;

pub use registry::Registry;

/// An entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Construct an entity from a raw id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id of this entity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Entity {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_index() {
        // Given
        let e1 = Entity::new(0);
        let e2 = Entity::from(42);
        let e3 = Entity::new(4999);

        // Then
        assert_eq!(e1.index(), 0);
        assert_eq!(e2.index(), 42);
        assert_eq!(e3.index(), 4999);
        assert_eq!(e2.id(), 42);
    }

    #[test]
    fn entity_ordering() {
        // Given
        let e1 = Entity::new(1);
        let e2 = Entity::new(2);

        // Then
        assert!(e1 < e2);
        assert_eq!(e1, Entity::from(1));
    }

    #[test]
    fn entity_display() {
        assert_eq!(Entity::new(7).to_string(), "Entity(7)");
    }
}
