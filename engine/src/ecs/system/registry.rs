//! System registry for storing systems and maintaining their member sets.

use std::{
    any::{Any, TypeId, type_name},
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use log::{debug, warn};

use crate::ecs::{
    entity::Entity,
    signature::Signature,
    system::System,
};

/// A registered system.
struct Entry {
    /// The Rust type name, for diagnostics.
    name: &'static str,

    /// Components an entity must hold to be a member. `None` until set, which matches every
    /// entity.
    signature: Option<Signature>,

    /// The system, as seen by the membership bookkeeping.
    system: Rc<RefCell<dyn System>>,

    /// The same allocation, kept for typed handles.
    handle: Rc<dyn Any>,
}

/// A registry holding one instance of each system type.
///
/// Systems are shared with the caller through `Rc<RefCell<_>>` handles. Membership updates borrow
/// each system mutably, so a handle must not be borrowed while components are being added or
/// removed, or entities destroyed.
#[derive(Default)]
pub struct Registry {
    /// Map from the Rust type to the entry index.
    types: HashMap<TypeId, usize>,

    /// Registered systems, in registration order.
    entries: Vec<Entry>,
}

impl Registry {
    /// Create a new, empty system registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system and return a shared handle to it.
    ///
    /// The system starts with an empty signature and no members. Entities only join it as their
    /// signatures change afterwards.
    ///
    /// # Panics
    /// - If a system of the same type is already registered.
    pub fn register<S: System>(&mut self, system: S) -> Rc<RefCell<S>> {
        let type_id = TypeId::of::<S>();
        assert!(
            !self.types.contains_key(&type_id),
            "registering system {} more than once",
            type_name::<S>()
        );

        let shared = Rc::new(RefCell::new(system));
        self.types.insert(type_id, self.entries.len());
        self.entries.push(Entry {
            name: type_name::<S>(),
            signature: None,
            system: shared.clone(),
            handle: shared.clone(),
        });
        debug!("registered system {}", type_name::<S>());
        shared
    }

    /// Set the components an entity must hold to be a member of `S`.
    ///
    /// Existing members are not re-evaluated. The new signature applies from the next signature
    /// change of each entity.
    ///
    /// # Panics
    /// - If `S` is not registered.
    pub fn set_signature<S: System>(&mut self, signature: Signature) {
        let index = self.index_of::<S>();
        let entry = &mut self.entries[index];
        if let Some(previous) = entry.signature.replace(signature) {
            warn!(
                "replacing signature {previous:?} of system {}; existing members are kept",
                entry.name
            );
        }
    }

    /// Get the signature of `S`, if one was set.
    ///
    /// # Panics
    /// - If `S` is not registered.
    pub fn signature<S: System>(&self) -> Option<&Signature> {
        self.entries[self.index_of::<S>()].signature.as_ref()
    }

    /// Get a handle to the registered `S`, if any.
    pub fn get<S: System>(&self) -> Option<Rc<RefCell<S>>> {
        let index = *self.types.get(&TypeId::of::<S>())?;
        Rc::downcast::<RefCell<S>>(self.entries[index].handle.clone()).ok()
    }

    /// Re-evaluate the entity against every system: insert it where the system's signature is a
    /// subset of `signature`, remove it everywhere else.
    ///
    /// # Panics
    /// - If a system handle is borrowed.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: &Signature) {
        for entry in &self.entries {
            let interested = match &entry.signature {
                Some(required) => signature.matches(required),
                None => true,
            };
            let mut system = entry.system.borrow_mut();
            if interested {
                system.members_mut().insert(entity);
            } else {
                system.members_mut().remove(entity);
            }
        }
    }

    /// Remove the entity from every system.
    ///
    /// # Panics
    /// - If a system handle is borrowed.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in &self.entries {
            entry.system.borrow_mut().members_mut().remove(entity);
        }
    }

    /// Number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of<S: System>(&self) -> usize {
        match self.types.get(&TypeId::of::<S>()) {
            Some(index) => *index,
            None => panic!("system {} used before registration", type_name::<S>()),
        }
    }
}
