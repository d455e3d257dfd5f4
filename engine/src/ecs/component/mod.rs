//! Component management for the ECS.
//!
//! Components are the plain data values attached to entities. Each component type gets a small
//! integer [`Id`] when it is registered, and exactly one dense [`Store`] that holds every value
//! of that type.
//!
//! ## Architecture
//!
//! - [`Component`]: The trait that all component types must implement
//! - [`Id`]: A unique identifier for each registered component type
//! - [`Store`]: Dense, swap-remove storage for the values of one component type
//! - [`AnyStore`]: The type-erased view of a store, used to fan entity destruction out to every
//!   store regardless of its element type
//! - [`Registry`]: Registration and lookup of component types and their stores
//!
//! ## Usage
//!
//! ```ignore
//! use sprite_engine::ecs::component::Registry;
//! use sprite_macros::Component;
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut registry = Registry::new(MAX_COMPONENTS);
//! let pos_id = registry.register::<Position>();
//! registry.store_mut::<Position>().insert(entity, Position { x: 0.0, y: 0.0 });
//! ```

mod registry;
mod store;

pub use registry::{Info, Registry};
pub use store::{AnyStore, Store};

pub use crate::ecs::storage::Slot;

/// A component type identifier, assigned in registration order starting at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component in the ECS.
///
/// At present this only sets the required trait bounds for a type to be used as a component.
/// Derive it with `#[derive(Component)]` from `sprite_macros`.
pub trait Component: 'static + Sized {}
