//! Scene-level components and systems built on the ECS: sprite transforms, a camera marker,
//! sprite rendering and keyboard driven movement.

mod movement;
mod sprite;
mod transform;

pub use movement::{Key, KeyMappings, Keyboard, KeyboardMovement};
pub use sprite::{SPRITE_COLOR, SpritePush, SpriteRenderSystem, SpriteTarget};
pub use transform::{CameraComponent, TransformComponent};
