//! Systems and their member sets.
//!
//! A system here is a piece of external logic (a renderer, a movement controller) that wants to
//! visit every entity holding a particular set of components. The ECS does not run systems. It
//! only keeps each system's [`Members`] up to date as entities gain and lose components, so the
//! owning code can iterate them whenever it likes.
//!
//! ```rust,ignore
//! #[derive(Default)]
//! struct Physics {
//!     members: Members,
//! }
//!
//! impl System for Physics {
//!     fn members(&self) -> &Members { &self.members }
//!     fn members_mut(&mut self) -> &mut Members { &mut self.members }
//! }
//!
//! let physics = coordinator.register_system(Physics::default());
//! coordinator.set_system_signature::<Physics>(coordinator.signature_of::<(Position, Velocity)>());
//!
//! for entity in physics.borrow().members().iter() {
//!     // ...
//! }
//! ```

mod registry;

use std::collections::BTreeSet;

pub use registry::Registry;

use crate::ecs::entity::Entity;

/// A type whose member set is maintained by the [`Registry`].
///
/// Implementors only expose their [`Members`]. Membership is driven entirely by the registry, so
/// implementations should treat `members_mut` as bookkeeping access and not edit the set
/// themselves.
pub trait System: 'static {
    /// The entities whose signature currently satisfies the system's signature.
    fn members(&self) -> &Members;

    /// Mutable access used by the registry to add and remove members.
    fn members_mut(&mut self) -> &mut Members;
}

/// Ordered set of the entities a system is interested in. Iterates in ascending entity id order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Members {
    entities: BTreeSet<Entity>,
}

impl Members {
    /// An empty member set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entities: BTreeSet::new(),
        }
    }

    /// Add an entity. Returns false if it was already a member.
    #[inline]
    pub fn insert(&mut self, entity: Entity) -> bool {
        self.entities.insert(entity)
    }

    /// Remove an entity. Returns false if it was not a member.
    #[inline]
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity)
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate the members in ascending id order.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }
}

impl<'a> IntoIterator for &'a Members {
    type Item = Entity;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter().copied()
    }
}
