use std::{
    any::type_name,
    fmt,
    io::{Read, Write},
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, trace};

use crate::ecs::{
    Coordinator,
    component::{self, AnyStore, Slot, Store},
    persist::{BlockReport, END_MARKER, LoadReport, MAX_NAME_LEN, Persist, PersistError},
};

/// Save and restore functions for one persistent component type, stored with its registry entry.
#[derive(Clone, Copy)]
pub(crate) struct Codec {
    pub(crate) name: &'static str,
    save: fn(&dyn AnyStore, &mut dyn Write) -> Result<(), PersistError>,
    load: fn(&mut Coordinator, &mut dyn Read, u32) -> Result<BlockReport, PersistError>,
}

impl Codec {
    pub(crate) fn of<T: Persist>() -> Self {
        Self {
            name: T::NAME,
            save: save_block::<T>,
            load: load_block::<T>,
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").field("name", &self.name).finish()
    }
}

fn downcast<T: Persist>(store: &dyn AnyStore) -> &Store<T> {
    match store.as_any().downcast_ref::<Store<T>>() {
        Some(store) => store,
        None => panic!("codec for {} attached to the wrong store", type_name::<T>()),
    }
}

/// Write the count and every value of the store, in slot order.
fn save_block<T: Persist>(store: &dyn AnyStore, out: &mut dyn Write) -> Result<(), PersistError> {
    let store = downcast::<T>(store);
    out.write_u32::<LittleEndian>(store.len() as u32)?;
    for value in store.values() {
        value.encode(out)?;
    }
    Ok(())
}

/// Decode `count` values and apply them. Nothing is applied unless the whole block decodes.
fn load_block<T: Persist>(
    coordinator: &mut Coordinator,
    input: &mut dyn Read,
    count: u32,
) -> Result<BlockReport, PersistError> {
    // Never trust the count for the allocation size.
    let mut values = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        values.push(T::decode(input)?);
    }

    let live = coordinator.components().store::<T>().len();
    let needed = values.len().saturating_sub(live);
    let free = coordinator.free_entity_count();
    if needed > free {
        return Err(PersistError::EntityCapacity {
            name: T::NAME,
            needed,
            free,
        });
    }

    let mut report = BlockReport {
        name: T::NAME,
        count,
        overwritten: 0,
        spawned: Vec::with_capacity(needed),
    };
    for (slot, value) in values.into_iter().enumerate() {
        if slot < live {
            coordinator
                .components_mut()
                .store_mut::<T>()
                .replace_at(Slot::new(slot), value);
            report.overwritten += 1;
        } else {
            let entity = coordinator.create_entity();
            coordinator.add_component(entity, value);
            report.spawned.push(entity);
        }
    }
    Ok(report)
}

/// Write every persistent store of the registry followed by the end marker. Returns the number of
/// blocks written.
pub(crate) fn write_snapshot(
    registry: &component::Registry,
    out: &mut dyn Write,
) -> Result<usize, PersistError> {
    let mut blocks = 0;
    for info in registry.iter() {
        let Some(codec) = info.codec() else {
            continue;
        };
        let Some(store) = registry.erased(info.id()) else {
            continue;
        };

        trace!("writing {} values of {}", store.len(), codec.name);
        out.write_u32::<LittleEndian>(codec.name.len() as u32)?;
        out.write_all(codec.name.as_bytes())?;
        out.write_u8(0)?;
        (codec.save)(store, out)?;
        blocks += 1;
    }
    out.write_all(END_MARKER)?;
    Ok(blocks)
}

/// Read blocks until the end marker, restoring each into the coordinator.
///
/// Blocks are applied as they are read. When a later block fails, earlier blocks stay applied.
pub(crate) fn read_snapshot(
    coordinator: &mut Coordinator,
    input: &mut dyn Read,
) -> Result<LoadReport, PersistError> {
    let mut report = LoadReport::default();
    while let Some((name, count)) = read_header(input)? {
        let Some(codec) = coordinator.components().find_persisted(&name).and_then(|info| info.codec())
        else {
            return Err(PersistError::UnknownComponent(name));
        };
        debug!("restoring {count} values of {name}");
        report.blocks.push((codec.load)(coordinator, input, count)?);
    }
    Ok(report)
}

/// Read a block header, or `None` at the end marker.
fn read_header(input: &mut dyn Read) -> Result<Option<(String, u32)>, PersistError> {
    let mut head = [0u8; 4];
    input.read_exact(&mut head[..3])?;
    if &head[..3] == END_MARKER {
        return Ok(None);
    }
    input.read_exact(&mut head[3..])?;

    let len = u32::from_le_bytes(head);
    if len > MAX_NAME_LEN {
        return Err(PersistError::NameTooLong(len));
    }

    let mut name = vec![0u8; len as usize + 1];
    input.read_exact(&mut name)?;
    if name.pop() != Some(0) {
        return Err(PersistError::CorruptName(format!(
            "{} is not NUL terminated",
            String::from_utf8_lossy(&name)
        )));
    }
    if name.contains(&0) {
        return Err(PersistError::CorruptName(format!(
            "{} contains a NUL byte",
            String::from_utf8_lossy(&name)
        )));
    }
    let name = String::from_utf8(name)
        .map_err(|error| PersistError::CorruptName(error.to_string()))?;

    let count = input.read_u32::<LittleEndian>()?;
    Ok(Some((name, count)))
}
