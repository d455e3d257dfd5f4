use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::trace;

use crate::ecs::{entity::Entity, signature::Signature};

/// The collection of all possible entities. This issues ids from a FIFO pool, tracks which ids
/// are currently alive, and stores the component signature of every entity.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Ids available for creation. Destroyed ids are pushed to the back.
    available: VecDeque<Entity>,

    /// Signature of every entity, indexed by entity id.
    signatures: Vec<Signature>,

    /// Bit N set means entity N is alive.
    alive: FixedBitSet,

    /// Number of entities currently alive.
    living: u32,
}

impl Registry {
    /// Construct a registry able to hold `capacity` live entities, with every id in
    /// `[0, capacity)` queued for creation in ascending order.
    pub fn new(capacity: u32) -> Self {
        Self {
            available: (0..capacity).map(Entity::new).collect(),
            signatures: vec![Signature::new(); capacity as usize],
            alive: FixedBitSet::with_capacity(capacity as usize),
            living: 0,
        }
    }

    /// Take the next id from the front of the pool.
    ///
    /// # Panics
    /// - If the number of live entities has reached the capacity.
    pub fn create(&mut self) -> Entity {
        assert!(
            self.living < self.capacity(),
            "too many entities in existence (max: {})",
            self.capacity()
        );
        let Some(entity) = self.available.pop_front() else {
            panic!("entity pool exhausted with {} live entities", self.living);
        };
        self.alive.insert(entity.index());
        self.living += 1;
        trace!("created {entity}");
        entity
    }

    /// Clear the entity's signature and return its id to the back of the pool.
    ///
    /// This does not touch component storage; the coordinator is responsible for emptying the
    /// stores as part of the same call.
    ///
    /// # Panics
    /// - If the entity is out of range.
    /// - If the entity is not alive.
    pub fn destroy(&mut self, entity: Entity) {
        self.check_range(entity);
        assert!(
            self.alive.contains(entity.index()),
            "attempted to destroy {entity}, which is not alive"
        );
        self.signatures[entity.index()].clear();
        self.alive.set(entity.index(), false);
        self.available.push_back(entity);
        self.living -= 1;
        trace!("destroyed {entity}");
    }

    /// Replace the signature of an entity.
    ///
    /// # Panics
    /// - If the entity is out of range.
    #[inline]
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) {
        self.check_range(entity);
        self.signatures[entity.index()] = signature;
    }

    /// Get the signature of an entity.
    ///
    /// # Panics
    /// - If the entity is out of range.
    #[inline]
    pub fn signature(&self, entity: Entity) -> &Signature {
        self.check_range(entity);
        &self.signatures[entity.index()]
    }

    /// Determine if the given entity is currently alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(entity.index())
    }

    /// Number of entities currently alive.
    #[inline]
    pub fn len(&self) -> u32 {
        self.living
    }

    /// Returns true if no entity is alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.living == 0
    }

    /// Maximum number of live entities.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.signatures.len() as u32
    }

    /// Iterate all live entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.ones().map(|index| Entity::new(index as u32))
    }

    #[inline]
    fn check_range(&self, entity: Entity) {
        assert!(
            entity.index() < self.signatures.len(),
            "{entity} out of range (max: {})",
            self.signatures.len()
        );
    }
}
