use crate::ecs::{entity::Entity, storage::Slot};

/// A block-based sparse index mapping entity ids to dense store slots.
///
/// This index divides the entity id space into fixed-size blocks, allocating memory only for
/// blocks that contain at least one entry. Within each block, a dense vector stores mappings,
/// allowing O(1) lookup with good cache locality.
///
/// Entity ids come out of a FIFO pool in ascending order, so the ids holding any one component
/// type tend to cluster. Clustered ids share blocks, which keeps the index small.
///
/// | Operation | Time | Memory |
/// |-----------|------|--------|
/// | `insert()` | O(1) amortized | Allocates block on first use |
/// | `get()` | O(1) | No allocation |
/// | `remove()` | O(1) | No deallocation (leaves `None`) |
///
/// ```ignore
/// let mut index = DynamicIndex::new_with_block_size(4);
///
/// index.insert(Entity::new(0), Slot::new(0));   // Block 0
/// index.insert(Entity::new(9), Slot::new(1));   // Block 2, block 1 never allocated
///
/// assert_eq!(index.get(Entity::new(9)), Some(Slot::new(1)));
/// assert_eq!(index.get(Entity::new(5)), None);
/// ```
#[derive(Debug, Clone)]
pub struct DynamicIndex {
    /// The size of blocks to allocate when growing the index.
    block_size: usize,

    /// A collection of optional blocks, each block is a vector of optional slots.
    /// Outer Vec is indexed by `entity / block_size`.
    /// Inner Vec is indexed by `entity % block_size`.
    maps: Vec<Option<Vec<Option<Slot>>>>,
}

impl DynamicIndex {
    /// Default block size balances memory usage and access speed for typical entity patterns.
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Create a new DynamicIndex with the default block size.
    #[inline]
    pub const fn new() -> Self {
        Self::new_with_block_size(Self::DEFAULT_BLOCK_SIZE)
    }

    /// Create a new DynamicIndex with a custom block size.
    ///
    /// # Panics
    ///
    /// Debug builds panic if block_size is 0.
    #[inline]
    pub const fn new_with_block_size(block_size: usize) -> Self {
        debug_assert!(block_size > 0, "block_size must be greater than 0");
        Self {
            block_size,
            maps: Vec::new(),
        }
    }

    /// Map the entity to the given slot, replacing any previous mapping.
    pub fn insert(&mut self, entity: Entity, slot: Slot) {
        let (block_index, within_block_index) = self.indices(entity);
        let block_size = self.block_size;

        // Ensure the maps vector has enough blocks
        if block_index >= self.maps.len() {
            self.maps.resize_with(block_index + 1, || None);
        }

        // Allocate the block on first use and write the slot into it
        let block = self.maps[block_index].get_or_insert_with(|| vec![None; block_size]);
        block[within_block_index] = Some(slot);
    }

    /// Get the slot for the given entity if it exists.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<Slot> {
        let (block_index, within_block_index) = self.indices(entity);
        let block = self.maps.get(block_index)?.as_ref()?;
        block[within_block_index]
    }

    /// Remove the mapping for the given entity, returning the old slot if it existed.
    #[inline]
    pub fn remove(&mut self, entity: Entity) -> Option<Slot> {
        let (block_index, within_block_index) = self.indices(entity);
        let block = self.maps.get_mut(block_index)?.as_mut()?;
        block[within_block_index].take()
    }

    /// Check if the index contains a mapping for the given entity.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Drop every mapping and every allocated block.
    #[cfg(test)]
    #[inline]
    pub fn clear(&mut self) {
        self.maps.clear();
    }

    /// Get the number of blocks, allocated or not.
    #[cfg(test)]
    #[inline]
    pub fn block_count(&self) -> usize {
        self.maps.len()
    }

    /// Get the number of blocks that have been allocated (non-None).
    #[cfg(test)]
    pub fn allocated_block_count(&self) -> usize {
        self.maps.iter().filter(|b| b.is_some()).count()
    }

    /// Calculate block and within-block indices for an entity.
    #[inline]
    fn indices(&self, entity: Entity) -> (usize, usize) {
        let entity_index = entity.index();
        (entity_index / self.block_size, entity_index % self.block_size)
    }
}

impl Default for DynamicIndex {
    /// Custom default to ensure we get the default block size.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
