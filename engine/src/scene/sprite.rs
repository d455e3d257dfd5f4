use glam::{Mat3, Vec4};

use crate::{
    ecs::{Coordinator, Members, System},
    scene::TransformComponent,
};

/// Per-draw data handed to the render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePush {
    pub transform: Mat3,
    pub color: Vec4,
}

/// Color every sprite is drawn with until sprites carry their own.
pub const SPRITE_COLOR: Vec4 = Vec4::new(128.0, 128.0, 128.0, 1.0);

/// Where sprites are drawn. Implemented by the renderer for the current frame's command buffer.
pub trait SpriteTarget {
    /// Bind the sprite pipeline and per-frame resources. Called once per render.
    fn bind(&mut self);

    /// Draw a single sprite quad.
    fn draw_sprite(&mut self, push: &SpritePush);
}

/// Draws one sprite per member entity.
///
/// Give it a signature containing [`TransformComponent`]; members without one are skipped.
#[derive(Debug, Default)]
pub struct SpriteRenderSystem {
    members: Members,
}

impl System for SpriteRenderSystem {
    fn members(&self) -> &Members {
        &self.members
    }

    fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }
}

impl SpriteRenderSystem {
    /// Draw every member. Returns the number of sprites drawn.
    pub fn render(&self, coordinator: &Coordinator, target: &mut dyn SpriteTarget) -> usize {
        target.bind();
        let mut drawn = 0;
        for entity in &self.members {
            let Some(transform) = coordinator.try_component::<TransformComponent>(entity) else {
                continue;
            };
            target.draw_sprite(&SpritePush {
                transform: transform.mat3(),
                color: SPRITE_COLOR,
            });
            drawn += 1;
        }
        drawn
    }
}
