use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Mat3, Vec2, Vec3};
use sprite_macros::Component;

use crate::ecs::Persist;

/// Placement of a sprite in the world.
///
/// The world placement combines a base part and a local offset: translations and rotations add,
/// scales multiply. `z_order` is carried in the translation column of [`mat3`](Self::mat3) so the
/// renderer can sort sprites.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vec2,
    pub scale: Vec2,
    /// Radians.
    pub rotation: f32,
    pub local_translation: Vec2,
    pub local_scale: Vec2,
    /// Radians.
    pub local_rotation: f32,
    pub z_order: u32,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            local_translation: Vec2::ZERO,
            local_scale: Vec2::ONE,
            local_rotation: 0.0,
            z_order: 0,
        }
    }
}

impl TransformComponent {
    /// A unit transform at `(x, y)` with the given z order.
    pub fn at(x: f32, y: f32, z_order: u32) -> Self {
        Self {
            translation: Vec2::new(x, y),
            z_order,
            ..Self::default()
        }
    }

    #[inline]
    pub fn world_translation(&self) -> Vec2 {
        self.translation + self.local_translation
    }

    #[inline]
    pub fn world_scale(&self) -> Vec2 {
        self.scale * self.local_scale
    }

    #[inline]
    pub fn world_rotation(&self) -> f32 {
        self.rotation + self.local_rotation
    }

    /// Column-major 2D transform: scaled rotation in the first two columns, world translation and
    /// z order in the third.
    pub fn mat3(&self) -> Mat3 {
        let (sin, cos) = self.world_rotation().sin_cos();
        let scale = self.world_scale();
        let translation = self.world_translation();
        Mat3::from_cols(
            scale.x * Vec3::new(cos, sin, 0.0),
            scale.y * Vec3::new(-sin, cos, 0.0),
            Vec3::new(translation.x, translation.y, self.z_order as f32),
        )
    }
}

fn write_vec2(out: &mut dyn Write, value: Vec2) -> io::Result<()> {
    out.write_f32::<LittleEndian>(value.x)?;
    out.write_f32::<LittleEndian>(value.y)
}

fn read_vec2(input: &mut dyn Read) -> io::Result<Vec2> {
    let x = input.read_f32::<LittleEndian>()?;
    let y = input.read_f32::<LittleEndian>()?;
    Ok(Vec2::new(x, y))
}

impl Persist for TransformComponent {
    const NAME: &'static str = "TransformComponent";

    fn encode(&self, out: &mut dyn Write) -> io::Result<()> {
        write_vec2(out, self.translation)?;
        write_vec2(out, self.scale)?;
        out.write_f32::<LittleEndian>(self.rotation)?;
        write_vec2(out, self.local_translation)?;
        write_vec2(out, self.local_scale)?;
        out.write_f32::<LittleEndian>(self.local_rotation)?;
        out.write_u32::<LittleEndian>(self.z_order)
    }

    fn decode(input: &mut dyn Read) -> io::Result<Self> {
        Ok(Self {
            translation: read_vec2(input)?,
            scale: read_vec2(input)?,
            rotation: input.read_f32::<LittleEndian>()?,
            local_translation: read_vec2(input)?,
            local_scale: read_vec2(input)?,
            local_rotation: input.read_f32::<LittleEndian>()?,
            z_order: input.read_u32::<LittleEndian>()?,
        })
    }
}

/// Marks the entity whose view the scene is drawn from.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CameraComponent {
    pub active: bool,
}

impl Persist for CameraComponent {
    const NAME: &'static str = "CameraComponent";

    fn encode(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_u8(u8::from(self.active))
    }

    fn decode(input: &mut dyn Read) -> io::Result<Self> {
        Ok(Self {
            active: input.read_u8()? != 0,
        })
    }
}
