//! Component presence bit sets.
//!
//! A [`Signature`] has one bit per component type id. Entities carry one describing the
//! components they currently hold, and systems carry one describing the components they
//! require. A system is interested in an entity when the system's signature is a subset of the
//! entity's.

use std::fmt;

use fixedbitset::FixedBitSet;

use crate::{
    all_tuples,
    ecs::component::{self, Component},
};

/// Bitset of component type ids.
///
/// Uses `FixedBitSet` under the hood and grows to fit whatever id is inserted. Equality and the
/// subset test only look at set bits, so two signatures compare equal regardless of how far
/// either one has grown.
#[derive(Default, Clone)]
pub struct Signature {
    bits: FixedBitSet,
}

impl Signature {
    /// An empty signature.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: FixedBitSet::new(),
        }
    }

    /// Construct a signature with room for `capacity` component ids without growing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Set the bit for the given component id.
    #[inline]
    pub fn insert(&mut self, id: component::Id) {
        self.bits.grow(id.index() + 1);
        self.bits.insert(id.index());
    }

    /// Clear the bit for the given component id.
    #[inline]
    pub fn remove(&mut self, id: component::Id) {
        if id.index() < self.bits.len() {
            self.bits.set(id.index(), false);
        }
    }

    /// Set or clear the bit for the given component id.
    #[inline]
    pub fn set(&mut self, id: component::Id, enabled: bool) {
        if enabled {
            self.insert(id);
        } else {
            self.remove(id);
        }
    }

    /// Returns true if the bit for the given component id is set.
    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        self.bits.contains(id.index())
    }

    /// Returns true if every bit set in `required` is also set in `self`. Extra bits in `self`
    /// are irrelevant, and an empty `required` matches everything.
    #[inline]
    pub fn matches(&self, required: &Signature) -> bool {
        self.bits.is_superset(&required.bits)
    }

    /// Clear every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Returns true if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate the component ids whose bits are set, in ascending order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = component::Id> + '_ {
        self.bits.ones().map(component::Id::from)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.bits.symmetric_difference(&other.bits).next().is_none()
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl FromIterator<component::Id> for Signature {
    fn from_iter<I: IntoIterator<Item = component::Id>>(iter: I) -> Self {
        let mut signature = Signature::new();
        for id in iter {
            signature.insert(id);
        }
        signature
    }
}

/// Trait for converting a component type, or tuple of component types, into a [`Signature`].
pub trait IntoSignature<Marker = ()> {
    /// Build the signature using the ids assigned by the given registry.
    ///
    /// # Panics
    /// - If any of the component types is not registered.
    fn into_signature(registry: &component::Registry) -> Signature;
}

/// [`IntoSignature`] implementation for the empty tuple.
impl IntoSignature for () {
    fn into_signature(_registry: &component::Registry) -> Signature {
        Signature::new()
    }
}

/// [`IntoSignature`] implementation for single component types.
impl<C: Component> IntoSignature for C {
    fn into_signature(registry: &component::Registry) -> Signature {
        let mut signature = Signature::new();
        signature.insert(registry.id::<C>());
        signature
    }
}

/// [`IntoSignature`] implementation for tuples of other [`IntoSignature`] types.
macro_rules! tuple_signature {
    ($($name: ident),*) => {
        impl<$($name: IntoSignature),*> IntoSignature for ($($name,)*) {
            fn into_signature(registry: &component::Registry) -> Signature {
                let mut signature = Signature::new();
                $(
                    signature.bits.union_with(&<$name>::into_signature(registry).bits);
                )*
                signature
            }
        }
    }
}

// Tuples of up to sixteen signatures.
all_tuples!(tuple_signature);

#[cfg(test)]
mod tests {
    use sprite_macros::Component;

    use super::*;
    use crate::ecs::component::Id;

    #[derive(Component)]
    struct Comp1;
    #[derive(Component)]
    struct Comp2;
    #[derive(Component)]
    struct Comp3;

    #[test]
    fn insert_and_remove() {
        // Given
        let mut signature = Signature::new();

        // When
        signature.insert(Id::new(2));
        signature.insert(Id::new(70));
        signature.set(Id::new(5), true);
        signature.remove(Id::new(2));
        signature.remove(Id::new(500));

        // Then
        assert!(!signature.contains(Id::new(2)));
        assert!(signature.contains(Id::new(5)));
        assert!(signature.contains(Id::new(70)));
        assert_eq!(signature.len(), 2);
        assert_eq!(signature.ids().collect::<Vec<_>>(), vec![Id::new(5), Id::new(70)]);
    }

    #[test]
    fn subset_matching() {
        // Given
        let entity: Signature = [Id::new(0), Id::new(1), Id::new(3)].into_iter().collect();
        let required: Signature = [Id::new(0), Id::new(3)].into_iter().collect();
        let missing: Signature = [Id::new(0), Id::new(2)].into_iter().collect();

        // Then
        assert!(entity.matches(&required));
        assert!(!entity.matches(&missing));
        assert!(entity.matches(&Signature::new()));
        assert!(!Signature::new().matches(&required));
    }

    #[test]
    fn equality_ignores_capacity() {
        // Given
        let mut small = Signature::new();
        let mut large = Signature::with_capacity(100);

        // When
        small.insert(Id::new(1));
        large.insert(Id::new(1));

        // Then
        assert_eq!(small, large);
        large.insert(Id::new(99));
        assert_ne!(small, large);
        large.clear();
        assert!(large.is_empty());
        assert_eq!(large, Signature::new());
    }

    #[test]
    fn signature_from_types() {
        // Given
        let mut registry = component::Registry::new(8);
        let id1 = registry.register::<Comp1>();
        let _id2 = registry.register::<Comp2>();
        let id3 = registry.register::<Comp3>();

        // When
        let single = Comp3::into_signature(&registry);
        let pair = <(Comp1, Comp3)>::into_signature(&registry);
        let empty = <()>::into_signature(&registry);

        // Then
        assert_eq!(single, [id3].into_iter().collect());
        assert_eq!(pair, [id1, id3].into_iter().collect());
        assert!(empty.is_empty());
    }
}
