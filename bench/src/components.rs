//! Component types used across benchmarks.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use sprite_engine::ecs::Persist;
use sprite_macros::Component;

/// 2D position (8 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity (8 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Zero-sized marker.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Tag;

impl Persist for Position {
    const NAME: &'static str = "Position";

    fn encode(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_f32::<LittleEndian>(self.x)?;
        out.write_f32::<LittleEndian>(self.y)
    }

    fn decode(input: &mut dyn Read) -> io::Result<Self> {
        Ok(Self {
            x: input.read_f32::<LittleEndian>()?,
            y: input.read_f32::<LittleEndian>()?,
        })
    }
}

impl Persist for Velocity {
    const NAME: &'static str = "Velocity";

    fn encode(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_f32::<LittleEndian>(self.dx)?;
        out.write_f32::<LittleEndian>(self.dy)
    }

    fn decode(input: &mut dyn Read) -> io::Result<Self> {
        Ok(Self {
            dx: input.read_f32::<LittleEndian>()?,
            dy: input.read_f32::<LittleEndian>()?,
        })
    }
}
