//! Binary snapshots of component data.
//!
//! A snapshot holds one block per persistent component type, in registration order, followed by
//! the end marker:
//!
//! ```text
//! [u32 name_len][name bytes][0u8][u32 count][count × payload] ... "EOF"
//! ```
//!
//! Integers are little-endian. Payloads are written by each type's [`Persist`] implementation in
//! slot order, so after removals they are not in entity order. Component types registered with
//! plain `register_component` are not written.
//!
//! Restoring a block writes the i-th value back into slot i while that slot is live (its owner and
//! signature stay as they are). Values beyond the live slots are attached to freshly created
//! entities, which puts them through the normal signature and system bookkeeping. The returned
//! [`LoadReport`] lists those new entities.
//!
//! There is no version tag or checksum. A snapshot is only readable by a build that registers the
//! same persistent types with the same field layouts.

mod error;
mod snapshot;

use std::io::{self, Read, Write};

pub use error::PersistError;
pub(crate) use snapshot::{Codec, read_snapshot, write_snapshot};

use crate::ecs::{component::Component, entity::Entity};

/// File written by [`Coordinator::save`](crate::ecs::Coordinator::save) when the caller has no
/// better idea.
pub const DEFAULT_SAVE_FILE: &str = "gameState.dat";

/// Bytes terminating every snapshot.
pub const END_MARKER: &[u8; 3] = b"EOF";

/// Longest component name accepted when reading a snapshot.
pub const MAX_NAME_LEN: u32 = 1024;

/// A component that can be written to and read back from a snapshot.
///
/// Implementations write a fixed sequence of primitive fields and read them back in the same
/// order. Floating point fields should round-trip bit for bit (`write_f32` / `read_f32`).
///
/// ```ignore
/// impl Persist for Health {
///     const NAME: &'static str = "Health";
///
///     fn encode(&self, out: &mut dyn Write) -> io::Result<()> {
///         out.write_u32::<LittleEndian>(self.0)
///     }
///
///     fn decode(input: &mut dyn Read) -> io::Result<Self> {
///         Ok(Self(input.read_u32::<LittleEndian>()?))
///     }
/// }
/// ```
pub trait Persist: Component {
    /// The name the component's block is written under. Must be unique among the persistent
    /// components of a coordinator.
    const NAME: &'static str;

    /// Write the component's fields.
    fn encode(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Read the component's fields, in the order [`encode`](Persist::encode) wrote them.
    fn decode(input: &mut dyn Read) -> io::Result<Self>;
}

/// What restoring one block did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    /// The persisted component name.
    pub name: &'static str,

    /// Number of values in the block.
    pub count: u32,

    /// Number of values written over live slots.
    pub overwritten: usize,

    /// Entities created to own values beyond the live slots, in slot order.
    pub spawned: Vec<Entity>,
}

/// What restoring a snapshot did, one entry per block in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub blocks: Vec<BlockReport>,
}

impl LoadReport {
    /// Total number of values restored across all blocks.
    pub fn restored(&self) -> usize {
        self.blocks.iter().map(|block| block.count as usize).sum()
    }

    /// Every entity created during the restore.
    pub fn spawned(&self) -> impl Iterator<Item = Entity> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.spawned.iter().copied())
    }
}
