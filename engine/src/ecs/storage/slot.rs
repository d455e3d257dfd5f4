/// A slot in a dense component store. A simple index into the store's value and entity vecs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slot(usize);

impl From<usize> for Slot {
    /// Get a slot From a usize index.
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl Slot {
    /// Construct a new slot from an index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index used in the store vecs.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}
