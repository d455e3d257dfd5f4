use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use log::debug;

use crate::ecs::{
    component::{AnyStore, Component, Id, Store},
    entity::Entity,
    persist::{Codec, Persist},
};

/// Metadata about a registered component type.
#[derive(Debug, Clone, Copy)]
pub struct Info {
    /// The component id.
    id: Id,

    /// The Rust type name, for diagnostics only.
    type_name: &'static str,

    /// How to save and restore the store, if the type is persistent.
    codec: Option<Codec>,
}

impl Info {
    /// Get the component id.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the Rust type name of the component.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get the name the component is persisted under, if it is persistent.
    #[inline]
    pub fn persisted_name(&self) -> Option<&'static str> {
        self.codec.map(|codec| codec.name)
    }

    #[inline]
    pub(crate) fn codec(&self) -> Option<Codec> {
        self.codec
    }
}

/// A registered component type and its store.
struct Entry {
    info: Info,
    store: Box<dyn AnyStore>,
}

/// The component type registry. Assigns every component type a monotonic [`Id`] and owns the one
/// [`Store`] for that type.
///
/// Types are keyed by `std::any::TypeId`, never by name, so two types can not collide. Entries
/// are kept in registration order, which is also the order stores are visited in when an entity
/// is destroyed or a snapshot is written.
pub struct Registry {
    /// Map from the Rust type to the component id.
    types: HashMap<TypeId, Id>,

    /// Registered components, indexed by their [`Id`].
    entries: Vec<Entry>,

    /// Maximum number of component types.
    capacity: usize,
}

impl Registry {
    /// Create a registry accepting up to `capacity` component types.
    pub fn new(capacity: usize) -> Self {
        Self {
            types: HashMap::new(),
            entries: Vec::new(),
            capacity,
        }
    }

    /// Register a component type and get its unique identifier.
    ///
    /// # Panics
    /// - If the type is already registered.
    /// - If the registry is full.
    pub fn register<C: Component>(&mut self) -> Id {
        self.register_with::<C>(None)
    }

    /// Register a component type that takes part in snapshots.
    ///
    /// # Panics
    /// - If the type is already registered.
    /// - If the registry is full.
    /// - If another persistent type is already registered under the same [`Persist::NAME`].
    pub fn register_persistent<C: Persist>(&mut self) -> Id {
        assert!(
            self.find_persisted(C::NAME).is_none(),
            "persisted name {:?} is already used by another component",
            C::NAME
        );
        self.register_with::<C>(Some(Codec::of::<C>()))
    }

    fn register_with<C: Component>(&mut self, codec: Option<Codec>) -> Id {
        let type_id = TypeId::of::<C>();
        assert!(
            !self.types.contains_key(&type_id),
            "registering component type {} more than once",
            type_name::<C>()
        );
        assert!(
            self.entries.len() < self.capacity,
            "too many component types registered (max: {})",
            self.capacity
        );

        let id = Id::from(self.entries.len());
        self.types.insert(type_id, id);
        self.entries.push(Entry {
            info: Info {
                id,
                type_name: type_name::<C>(),
                codec,
            },
            store: Box::new(Store::<C>::new()),
        });
        debug!("registered component {} as {:?}", type_name::<C>(), id);
        id
    }

    /// Get the component id for type `C`.
    ///
    /// # Panics
    /// - If `C` is not registered.
    #[inline]
    pub fn id<C: Component>(&self) -> Id {
        match self.try_id::<C>() {
            Some(id) => id,
            None => panic!("component {} not registered before use", type_name::<C>()),
        }
    }

    /// Get the component id for type `C`, if registered.
    #[inline]
    pub fn try_id<C: Component>(&self) -> Option<Id> {
        self.types.get(&TypeId::of::<C>()).copied()
    }

    /// Get the metadata for a component id.
    #[inline]
    pub fn info(&self, id: Id) -> Option<&Info> {
        self.entries.get(id.index()).map(|entry| &entry.info)
    }

    /// Get the diagnostic type name for a component id.
    #[inline]
    pub fn name(&self, id: Id) -> Option<&'static str> {
        self.info(id).map(Info::type_name)
    }

    /// Get the store for type `C`.
    ///
    /// # Panics
    /// - If `C` is not registered.
    pub fn store<C: Component>(&self) -> &Store<C> {
        let id = self.id::<C>();
        match self.entries[id.index()]
            .store
            .as_any()
            .downcast_ref::<Store<C>>()
        {
            Some(store) => store,
            None => panic!("store {:?} does not hold {}", id, type_name::<C>()),
        }
    }

    /// Get the mutable store for type `C`.
    ///
    /// # Panics
    /// - If `C` is not registered.
    pub fn store_mut<C: Component>(&mut self) -> &mut Store<C> {
        let id = self.id::<C>();
        match self.entries[id.index()]
            .store
            .as_any_mut()
            .downcast_mut::<Store<C>>()
        {
            Some(store) => store,
            None => panic!("store {:?} does not hold {}", id, type_name::<C>()),
        }
    }

    /// Get the type-erased store for a component id.
    #[inline]
    pub fn erased(&self, id: Id) -> Option<&dyn AnyStore> {
        self.entries.get(id.index()).map(|entry| entry.store.as_ref())
    }

    /// Notify every store that the entity was destroyed.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in &mut self.entries {
            entry.store.entity_destroyed(entity);
        }
    }

    /// Number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no component type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the metadata of every registered type in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Info> + '_ {
        self.entries.iter().map(|entry| &entry.info)
    }

    /// Find a persistent component by the name it is saved under.
    pub(crate) fn find_persisted(&self, name: &str) -> Option<&Info> {
        self.iter()
            .find(|info| info.persisted_name() == Some(name))
    }
}
