//! Low level building blocks shared by the component stores.

mod index;
mod slot;

pub use index::DynamicIndex;
pub use slot::Slot;
