use glam::Vec2;

use crate::{
    ecs::{Coordinator, Entity},
    scene::TransformComponent,
};

/// Keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    T,
    Escape,
}

/// Raw key state, polled once per frame.
pub trait Keyboard {
    fn pressed(&self, key: Key) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMappings {
    pub move_left: Key,
    pub move_right: Key,
    pub move_up: Key,
    pub move_down: Key,
}

impl Default for KeyMappings {
    fn default() -> Self {
        Self {
            move_left: Key::A,
            move_right: Key::D,
            move_up: Key::W,
            move_down: Key::S,
        }
    }
}

/// Moves an entity's [`TransformComponent`] from keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardMovement {
    pub keys: KeyMappings,
    /// World units per second.
    pub move_speed: f32,
}

impl Default for KeyboardMovement {
    fn default() -> Self {
        Self {
            keys: KeyMappings::default(),
            move_speed: 5.0,
        }
    }
}

impl KeyboardMovement {
    /// The normalized direction requested by the pressed keys, or zero when they cancel out.
    pub fn direction(&self, keyboard: &dyn Keyboard) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if keyboard.pressed(self.keys.move_right) {
            direction.x += 1.0;
        }
        if keyboard.pressed(self.keys.move_left) {
            direction.x -= 1.0;
        }
        if keyboard.pressed(self.keys.move_up) {
            direction.y += 1.0;
        }
        if keyboard.pressed(self.keys.move_down) {
            direction.y -= 1.0;
        }
        direction.normalize_or_zero()
    }

    /// Move the entity by `move_speed * dt` in the requested direction. Returns true if it moved.
    ///
    /// # Panics
    /// - If the entity has no [`TransformComponent`].
    pub fn move_entity(
        &self,
        keyboard: &dyn Keyboard,
        dt: f32,
        coordinator: &mut Coordinator,
        entity: Entity,
    ) -> bool {
        let direction = self.direction(keyboard);
        let transform = coordinator.component_mut::<TransformComponent>(entity);
        if direction.length_squared() <= f32::EPSILON {
            return false;
        }
        transform.translation += self.move_speed * dt * direction;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Pressed(HashSet<Key>);

    impl Pressed {
        fn keys(keys: &[Key]) -> Self {
            Self(keys.iter().copied().collect())
        }
    }

    impl Keyboard for Pressed {
        fn pressed(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    fn setup() -> (Coordinator, Entity) {
        let mut coordinator = Coordinator::new();
        coordinator.register_persistent_component::<TransformComponent>();
        let entity = coordinator.create_entity();
        coordinator.add_component(entity, TransformComponent::at(0.0, 0.0, 1));
        (coordinator, entity)
    }

    #[test]
    fn moves_along_pressed_key() {
        // Given
        let (mut coordinator, entity) = setup();
        let movement = KeyboardMovement::default();

        // When
        let moved = movement.move_entity(&Pressed::keys(&[Key::D]), 0.5, &mut coordinator, entity);

        // Then
        assert!(moved);
        assert_eq!(
            coordinator.component::<TransformComponent>(entity).translation,
            Vec2::new(2.5, 0.0)
        );
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        // Given
        let (mut coordinator, entity) = setup();
        let movement = KeyboardMovement::default();

        // When
        movement.move_entity(&Pressed::keys(&[Key::W, Key::A]), 1.0, &mut coordinator, entity);

        // Then
        let translation = coordinator.component::<TransformComponent>(entity).translation;
        assert!((translation.length() - 5.0).abs() < 1e-5);
        assert!(translation.x < 0.0 && translation.y > 0.0);
    }

    #[test]
    fn opposing_keys_do_not_move() {
        // Given
        let (mut coordinator, entity) = setup();
        let movement = KeyboardMovement::default();

        // When
        let moved = movement.move_entity(
            &Pressed::keys(&[Key::A, Key::D]),
            1.0,
            &mut coordinator,
            entity,
        );

        // Then
        assert!(!moved);
        assert_eq!(
            coordinator.component::<TransformComponent>(entity).translation,
            Vec2::ZERO
        );
    }

    #[test]
    fn custom_mappings() {
        // Given
        let movement = KeyboardMovement {
            keys: KeyMappings {
                move_up: Key::E,
                ..KeyMappings::default()
            },
            move_speed: 1.0,
        };

        // Then
        assert_eq!(movement.direction(&Pressed::keys(&[Key::E])), Vec2::Y);
        assert_eq!(movement.direction(&Pressed::keys(&[Key::W])), Vec2::ZERO);
    }
}
