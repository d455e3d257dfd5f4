use std::any::{Any, type_name};

use crate::ecs::{
    component::Component,
    entity::Entity,
    storage::{DynamicIndex, Slot},
};

/// Type-erased view of a [`Store`].
///
/// The component registry holds every store behind this trait so a single entity destruction can
/// reach all of them without knowing their element types. Typed access is recovered by
/// downcasting through [`as_any`](AnyStore::as_any) once the caller names the type.
pub trait AnyStore: Any {
    /// Remove the entity's component if the store holds one, otherwise do nothing.
    fn entity_destroyed(&mut self, entity: Entity);

    /// Number of live values in the store.
    fn len(&self) -> usize;

    /// Returns true if the store holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upcast for downcasting to the concrete store.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting to the concrete store.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for every value of one component type.
///
/// Values live packed in slots `[0, len)` with no gaps. Two maps tie slots to entities: a sparse
/// entity→slot index and a dense slot→entity vec, always exact inverses over the live slots.
///
/// Removing a value moves the value in the last slot into the hole, so any slot (and the value in
/// it) may change on any removal, even of an unrelated entity. References handed out by the store
/// borrow it, so the borrow checker rejects holding one across a removal.
#[derive(Debug, Clone)]
pub struct Store<T> {
    /// The dense storage of component values.
    values: Vec<T>,

    /// The sparse index mapping entity ids to slots.
    index: DynamicIndex,

    /// The entity owning each slot. Kept in the same order as `values`.
    entities: Vec<Entity>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    /// Construct an empty store.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            index: DynamicIndex::new(),
            entities: Vec::new(),
        }
    }

    /// Append a value for the given entity and return a reference to the stored value.
    ///
    /// # Panics
    /// - If the entity already has a value in this store.
    pub fn insert(&mut self, entity: Entity, value: T) -> &mut T {
        assert!(
            !self.index.contains(entity),
            "{entity} already has a {} component",
            type_name::<T>()
        );
        let slot = Slot::new(self.values.len());
        self.index.insert(entity, slot);
        self.entities.push(entity);
        self.values.push(value);
        &mut self.values[slot.index()]
    }

    /// Remove and return the entity's value. The value in the last slot moves into the freed slot
    /// to keep the store dense.
    ///
    /// # Panics
    /// - If the entity has no value in this store.
    pub fn remove(&mut self, entity: Entity) -> T {
        let Some(slot) = self.index.remove(entity) else {
            panic!("{entity} does not have a {} component", type_name::<T>());
        };
        let last = self.values.len() - 1;
        if slot.index() != last {
            // The last entity is about to move into the freed slot.
            let moved = self.entities[last];
            self.index.insert(moved, slot);
        }
        self.entities.swap_remove(slot.index());
        self.values.swap_remove(slot.index())
    }

    /// Get the entity's value.
    ///
    /// # Panics
    /// - If the entity has no value in this store.
    #[inline]
    pub fn get(&self, entity: Entity) -> &T {
        match self.try_get(entity) {
            Some(value) => value,
            None => panic!("retrieving non-existent {} for {entity}", type_name::<T>()),
        }
    }

    /// Get a mutable reference to the entity's value.
    ///
    /// # Panics
    /// - If the entity has no value in this store.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        match self.try_get_mut(entity) {
            Some(value) => value,
            None => panic!("retrieving non-existent {} for {entity}", type_name::<T>()),
        }
    }

    /// Get the entity's value, if it has one.
    #[inline]
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.index
            .get(entity)
            .and_then(|slot| self.values.get(slot.index()))
    }

    /// Get a mutable reference to the entity's value, if it has one.
    #[inline]
    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.index
            .get(entity)
            .and_then(|slot| self.values.get_mut(slot.index()))
    }

    /// Determine if the entity has a value in this store.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains(entity)
    }

    /// Remove the entity's value if present. Returns the removed value.
    #[inline]
    pub fn take(&mut self, entity: Entity) -> Option<T> {
        if self.contains(entity) {
            Some(self.remove(entity))
        } else {
            None
        }
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the store holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The slot currently holding the entity's value.
    #[inline]
    pub fn slot_of(&self, entity: Entity) -> Option<Slot> {
        self.index.get(entity)
    }

    /// The entity owning the given slot, if the slot is live.
    #[inline]
    pub fn entity_at(&self, slot: Slot) -> Option<Entity> {
        self.entities.get(slot.index()).copied()
    }

    /// Replace the value in a live slot, leaving its owner untouched. Returns the old value.
    ///
    /// # Panics
    /// - If the slot is not live.
    pub fn replace_at(&mut self, slot: Slot, value: T) -> T {
        assert!(
            slot.index() < self.values.len(),
            "slot {} out of range for {} store of length {}",
            slot.index(),
            type_name::<T>(),
            self.values.len()
        );
        std::mem::replace(&mut self.values[slot.index()], value)
    }

    /// Entities in slot order.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Values in slot order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate `(entity, value)` pairs in slot order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Entity, &T)> + '_ {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterate `(entity, value)` pairs in slot order with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (Entity, &mut T)> + '_ {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }
}

impl<T: Component> AnyStore for Store<T> {
    fn entity_destroyed(&mut self, entity: Entity) {
        self.take(entity);
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use sprite_macros::Component;

    use super::*;

    #[derive(Component, Debug, Clone, Copy, PartialEq)]
    struct Health(u32);

    fn entity(id: u32) -> Entity {
        Entity::new(id)
    }

    /// Check that the two maps are exact inverses over the live slots.
    fn assert_dense<T>(store: &Store<T>) {
        assert_eq!(store.values.len(), store.entities.len());
        for (slot, entity) in store.entities.iter().enumerate() {
            assert_eq!(store.index.get(*entity), Some(Slot::new(slot)));
        }
    }

    #[test]
    fn insert_and_get() {
        // Given
        let mut store = Store::new();

        // When
        let inserted = store.insert(entity(3), Health(30));
        inserted.0 += 1;
        store.insert(entity(7), Health(70));

        // Then
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(entity(3)), &Health(31));
        assert_eq!(store.get(entity(7)), &Health(70));
        assert_eq!(store.try_get(entity(4)), None);
        assert_eq!(store.slot_of(entity(7)), Some(Slot::new(1)));
        assert_eq!(store.entity_at(Slot::new(0)), Some(entity(3)));
        assert_dense(&store);
    }

    #[test]
    fn remove_swaps_last_into_hole() {
        // Given
        let mut store = Store::new();
        store.insert(entity(0), Health(0));
        store.insert(entity(1), Health(10));
        store.insert(entity(2), Health(20));

        // When
        let removed = store.remove(entity(0));

        // Then - Entity 2 moved from the last slot into slot 0
        assert_eq!(removed, Health(0));
        assert_eq!(store.len(), 2);
        assert_eq!(store.entities(), &[entity(2), entity(1)]);
        assert_eq!(store.values(), &[Health(20), Health(10)]);
        assert_eq!(store.slot_of(entity(2)), Some(Slot::new(0)));
        assert!(!store.contains(entity(0)));
        assert_dense(&store);
    }

    #[test]
    fn remove_last_slot_without_swap() {
        // Given
        let mut store = Store::new();
        store.insert(entity(0), Health(0));
        store.insert(entity(1), Health(10));

        // When
        store.remove(entity(1));
        store.remove(entity(0));

        // Then
        assert!(store.is_empty());
        assert_dense(&store);
    }

    #[test]
    fn entity_destroyed_is_noop_when_absent() {
        // Given
        let mut store = Store::new();
        store.insert(entity(5), Health(50));

        // When
        AnyStore::entity_destroyed(&mut store, entity(6));
        AnyStore::entity_destroyed(&mut store, entity(5));

        // Then
        assert_eq!(AnyStore::len(&store), 0);
        assert!(AnyStore::is_empty(&store));
    }

    #[test]
    fn replace_at_keeps_owner() {
        // Given
        let mut store = Store::new();
        store.insert(entity(9), Health(1));

        // When
        let old = store.replace_at(Slot::new(0), Health(2));

        // Then
        assert_eq!(old, Health(1));
        assert_eq!(store.get(entity(9)), &Health(2));
    }

    #[test]
    fn random_inserts_and_removes_stay_dense() {
        // Given
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut store = Store::new();
        let mut present = std::collections::BTreeMap::new();

        // When - A long random sequence of inserts and removes
        for step in 0..5_000u32 {
            let e = entity(rng.gen_range(0..300));
            if present.contains_key(&e) {
                let removed = store.remove(e);
                assert_eq!(Some(removed), present.remove(&e));
            } else {
                store.insert(e, Health(step));
                present.insert(e, Health(step));
            }

            // Then - size matches the holders and the maps stay inverse
            assert_eq!(store.len(), present.len());
        }
        assert_dense(&store);
        for (e, value) in store.iter() {
            assert_eq!(present.get(&e), Some(value));
        }
    }

    #[test]
    #[should_panic(expected = "already has a")]
    fn duplicate_insert_panics() {
        let mut store = Store::new();
        store.insert(entity(1), Health(1));
        store.insert(entity(1), Health(2));
    }

    #[test]
    #[should_panic(expected = "does not have a")]
    fn remove_missing_panics() {
        let mut store: Store<Health> = Store::new();
        store.remove(entity(1));
    }

    #[test]
    #[should_panic(expected = "retrieving non-existent")]
    fn get_missing_panics() {
        let store: Store<Health> = Store::new();
        store.get(entity(1));
    }
}
