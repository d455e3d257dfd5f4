//! The Coordinator ties the entity, component and system registries together.
//!
//! Every structural change goes through here so the three registries never disagree: adding or
//! removing a component updates the entity's [`Signature`] and then immediately re-evaluates the
//! entity against every system. Destroying an entity clears the entity registry first, then every
//! component store, then every system's members.
//!
//! # Example
//!
//! ```ignore
//! let mut coordinator = Coordinator::new();
//! coordinator.register_component::<Position>();
//!
//! let entity = coordinator.create_entity();
//! coordinator.add_component(entity, Position { x: 0.0, y: 0.0 }).x += 1.0;
//! assert_eq!(coordinator.component::<Position>(entity).x, 1.0);
//!
//! coordinator.destroy_entity(entity);
//! ```
use std::{
    any::type_name,
    cell::RefCell,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    marker::PhantomData,
    path::Path,
    rc::Rc,
};

use log::{debug, info, trace};

use crate::ecs::{
    Config,
    component::{self, Component},
    entity::{self, Entity},
    persist::{self, LoadReport, Persist, PersistError},
    signature::{IntoSignature, Signature},
    system::{self, System},
};

/// Owner of all entities, component stores and systems.
///
/// A Coordinator is an ordinary value: construct as many as needed and drop one to tear it down.
///
/// Component references returned by the accessors borrow the coordinator, so none can be held
/// across a call that adds or removes components. Removing any value from a store may move
/// another value of the same type to a different slot.
pub struct Coordinator {
    /// Entity id pool and per-entity signatures.
    entities: entity::Registry,

    /// Component type ids and their stores.
    components: component::Registry,

    /// Systems and their members.
    systems: system::Registry,

    /// Marker to make the Coordinator !Send. Systems are shared through `Rc`.
    _not_send: PhantomData<*mut ()>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Create a coordinator with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::DEFAULT)
    }

    /// Create a coordinator with custom capacity limits.
    pub fn with_config(config: Config) -> Self {
        debug!(
            "creating coordinator for {} entities and {} component types",
            config.max_entities, config.max_components
        );
        Self {
            entities: entity::Registry::new(config.max_entities),
            components: component::Registry::new(config.max_components),
            systems: system::Registry::new(),
            _not_send: PhantomData,
        }
    }

    #[inline]
    pub fn entities(&self) -> &entity::Registry {
        &self.entities
    }

    #[inline]
    pub fn components(&self) -> &component::Registry {
        &self.components
    }

    #[inline]
    pub(crate) fn components_mut(&mut self) -> &mut component::Registry {
        &mut self.components
    }

    #[inline]
    pub fn systems(&self) -> &system::Registry {
        &self.systems
    }

    // Entities

    /// Create an entity with an empty signature.
    ///
    /// # Panics
    /// - If `max_entities` entities are already alive.
    #[inline]
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity, dropping all of its components and removing it from every system. Its
    /// id goes to the back of the pool for reuse.
    ///
    /// # Panics
    /// - If the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) {
        self.entities.destroy(entity);
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        trace!("destroyed {entity}");
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of entities alive.
    #[inline]
    pub fn living_count(&self) -> u32 {
        self.entities.len()
    }

    /// Number of entities that can still be created.
    #[inline]
    pub fn free_entity_count(&self) -> usize {
        (self.entities.capacity() - self.entities.len()) as usize
    }

    /// Get the signature of an entity. Dead entities have an empty signature.
    ///
    /// # Panics
    /// - If the entity id is out of range.
    #[inline]
    pub fn signature(&self, entity: Entity) -> &Signature {
        self.entities.signature(entity)
    }

    // Components

    /// Register a component type that is not written to snapshots.
    ///
    /// # Panics
    /// - If the type is already registered or the component registry is full.
    #[inline]
    pub fn register_component<T: Component>(&mut self) -> component::Id {
        self.components.register::<T>()
    }

    /// Register a component type that is written to and restored from snapshots.
    ///
    /// # Panics
    /// - If the type is already registered or the component registry is full.
    /// - If another persistent type uses the same name.
    #[inline]
    pub fn register_persistent_component<T: Persist>(&mut self) -> component::Id {
        self.components.register_persistent::<T>()
    }

    /// Attach a component to an entity and return a reference to the stored value.
    ///
    /// # Panics
    /// - If the entity is not alive.
    /// - If `T` is not registered.
    /// - If the entity already has a `T`.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        assert!(
            self.entities.is_alive(entity),
            "adding {} to {entity} which is not alive",
            type_name::<T>()
        );
        let id = self.components.id::<T>();
        self.components.store_mut::<T>().insert(entity, value);
        self.set_signature_bit(entity, id, true);
        self.components.store_mut::<T>().get_mut(entity)
    }

    /// Detach a component from an entity and return it.
    ///
    /// # Panics
    /// - If `T` is not registered.
    /// - If the entity does not have a `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> T {
        let id = self.components.id::<T>();
        let value = self.components.store_mut::<T>().remove(entity);
        self.set_signature_bit(entity, id, false);
        value
    }

    /// Detach `T` from every entity holding one. Returns how many were removed.
    ///
    /// # Panics
    /// - If `T` is not registered.
    pub fn clear_components<T: Component>(&mut self) -> usize {
        let holders = self.components.store::<T>().entities().to_vec();
        for entity in &holders {
            self.remove_component::<T>(*entity);
        }
        debug!("cleared {} {} components", holders.len(), type_name::<T>());
        holders.len()
    }

    /// Get an entity's component.
    ///
    /// # Panics
    /// - If `T` is not registered or the entity does not have a `T`.
    #[inline]
    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        self.components.store::<T>().get(entity)
    }

    /// Get an entity's component mutably. Changing the value does not affect signatures.
    ///
    /// # Panics
    /// - If `T` is not registered or the entity does not have a `T`.
    #[inline]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        self.components.store_mut::<T>().get_mut(entity)
    }

    /// Get an entity's component, if it has one.
    ///
    /// # Panics
    /// - If `T` is not registered.
    #[inline]
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.store::<T>().try_get(entity)
    }

    /// Returns true if the entity has a `T`.
    ///
    /// # Panics
    /// - If `T` is not registered.
    #[inline]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components.store::<T>().contains(entity)
    }

    /// Get the id assigned to `T`.
    ///
    /// # Panics
    /// - If `T` is not registered.
    #[inline]
    pub fn component_type<T: Component>(&self) -> component::Id {
        self.components.id::<T>()
    }

    /// Get the diagnostic type name registered for a component id.
    #[inline]
    pub fn component_name(&self, id: component::Id) -> Option<&'static str> {
        self.components.name(id)
    }

    /// Build a signature from a component type or a tuple of component types.
    ///
    /// # Panics
    /// - If any of the types is not registered.
    #[inline]
    pub fn signature_of<IS: IntoSignature>(&self) -> Signature {
        IS::into_signature(&self.components)
    }

    fn set_signature_bit(&mut self, entity: Entity, id: component::Id, enabled: bool) {
        let mut signature = self.entities.signature(entity).clone();
        signature.set(id, enabled);
        self.entities.set_signature(entity, signature);
        self.systems
            .entity_signature_changed(entity, self.entities.signature(entity));
    }

    // Systems

    /// Register a system and return a shared handle to it. Entities become members as their
    /// signatures change after registration.
    ///
    /// # Panics
    /// - If a system of the same type is already registered.
    #[inline]
    pub fn register_system<S: System>(&mut self, system: S) -> Rc<RefCell<S>> {
        self.systems.register(system)
    }

    /// Set the components an entity must hold to be a member of `S`.
    ///
    /// # Panics
    /// - If `S` is not registered.
    #[inline]
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) {
        self.systems.set_signature::<S>(signature);
    }

    /// Get the handle of a registered system.
    #[inline]
    pub fn system<S: System>(&self) -> Option<Rc<RefCell<S>>> {
        self.systems.get::<S>()
    }

    // Persistence

    /// Write a snapshot of every persistent component store. Returns the number of blocks
    /// written.
    pub fn write_snapshot<W: Write>(&self, mut out: W) -> Result<usize, PersistError> {
        persist::write_snapshot(&self.components, &mut out)
    }

    /// Restore a snapshot written by [`write_snapshot`](Self::write_snapshot).
    pub fn read_snapshot<R: Read>(&mut self, mut input: R) -> Result<LoadReport, PersistError> {
        persist::read_snapshot(self, &mut input)
    }

    /// Save a snapshot to a file, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, PersistError> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        let blocks = self.write_snapshot(&mut out)?;
        out.flush()?;
        info!("saved {blocks} component blocks to {}", path.display());
        Ok(blocks)
    }

    /// Restore a snapshot from a file.
    ///
    /// # Errors
    /// - [`PersistError::NotFound`] if the file does not exist.
    /// - Any error of [`read_snapshot`](Self::read_snapshot).
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, PersistError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => PersistError::NotFound(path.to_path_buf()),
            _ => PersistError::from(error),
        })?;
        let report = self.read_snapshot(BufReader::new(file))?;
        info!(
            "loaded {} component values in {} blocks from {}",
            report.restored(),
            report.blocks.len(),
            path.display()
        );
        Ok(report)
    }
}
