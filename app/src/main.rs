//! Headless sprite scene.
//!
//! Scatters ten sprites at seeded random positions plus one keyboard controlled sprite, then plays
//! a scripted sequence of key presses: move, destroy one sprite (Q), save (E), drift and reload
//! (T). Each frame is "rendered" into a target that counts draw calls.

use std::{env, path::PathBuf};

use glam::Vec2;
use log::{LevelFilter, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sprite_engine::{
    ecs::{Coordinator, Entity, persist::DEFAULT_SAVE_FILE},
    logging::{self, ChannelLogger},
    scene::{
        CameraComponent, Key, Keyboard, KeyboardMovement, SpritePush, SpriteRenderSystem,
        SpriteTarget, TransformComponent,
    },
};

const SCATTERED: usize = 10;
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Keys held down on a given frame.
struct Script {
    frame: usize,
}

impl Script {
    fn held(frame: usize) -> &'static [Key] {
        match frame {
            0..=29 => &[Key::D],
            30..=59 => &[Key::W, Key::D],
            60 => &[Key::Q],
            61 => &[Key::E],
            62..=89 => &[Key::A],
            90 => &[Key::T],
            _ => &[],
        }
    }
}

impl Keyboard for Script {
    fn pressed(&self, key: Key) -> bool {
        Self::held(self.frame).contains(&key)
    }
}

#[derive(Default)]
struct CountingTarget {
    frames: usize,
    draws: usize,
}

impl SpriteTarget for CountingTarget {
    fn bind(&mut self) {
        self.frames += 1;
    }

    fn draw_sprite(&mut self, _push: &SpritePush) {
        self.draws += 1;
    }
}

fn scatter(coordinator: &mut Coordinator, rng: &mut ChaCha8Rng) -> Vec<Entity> {
    (0..SCATTERED)
        .map(|_| {
            let entity = coordinator.create_entity();
            let transform = TransformComponent {
                rotation: rng.gen_range(1.0..2.0),
                ..TransformComponent::at(
                    rng.gen_range(1..=10) as f32 - 5.0,
                    rng.gen_range(1..=10) as f32 - 5.0,
                    rng.gen_range(1..=10),
                )
            };
            coordinator.add_component(entity, transform);
            entity
        })
        .collect()
}

fn main() {
    let (logger, log_recv) = ChannelLogger::with_receiver();
    if let Err(error) = logger.with_level(LevelFilter::Debug).install() {
        eprintln!("logger already installed: {error}");
    }

    let save_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(DEFAULT_SAVE_FILE));
    let seed = env::args().nth(2).and_then(|s| s.parse().ok()).unwrap_or(7);

    let mut coordinator = Coordinator::new();
    coordinator.register_persistent_component::<TransformComponent>();
    coordinator.register_persistent_component::<CameraComponent>();

    let sprites = coordinator.register_system(SpriteRenderSystem::default());
    coordinator.set_system_signature::<SpriteRenderSystem>(
        coordinator.signature_of::<TransformComponent>(),
    );

    let camera = coordinator.create_entity();
    coordinator.add_component(camera, CameraComponent { active: true });

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let scattered = scatter(&mut coordinator, &mut rng);
    let removal = scattered[SCATTERED / 2];

    let moving = coordinator.create_entity();
    coordinator.add_component(moving, TransformComponent::at(0.0, 0.0, 1));

    let controller = KeyboardMovement::default();
    let mut target = CountingTarget::default();
    let mut saved_at = None;

    for frame in 0..120 {
        let keyboard = Script { frame };
        controller.move_entity(&keyboard, FRAME_TIME, &mut coordinator, moving);

        if keyboard.pressed(Key::Q) && coordinator.is_alive(removal) {
            coordinator.destroy_entity(removal);
        }
        if keyboard.pressed(Key::E) {
            match coordinator.save(&save_path) {
                Ok(_) => {
                    saved_at = Some(coordinator.component::<TransformComponent>(moving).translation)
                }
                Err(error) => warn!("save failed: {error}"),
            }
        }
        if keyboard.pressed(Key::T) {
            match coordinator.load(&save_path) {
                Ok(report) => info!("restored {} values", report.restored()),
                Err(error) => warn!("load failed: {error}"),
            }
        }

        sprites.borrow().render(&coordinator, &mut target);

        for message in logging::drain(&log_recv) {
            println!("[{:>5}] {}: {}", message.level, message.target, message.message);
        }
    }

    let position: Vec2 = coordinator.component::<TransformComponent>(moving).translation;
    println!(
        "{} frames, {} sprite draws, {} entities alive",
        target.frames,
        target.draws,
        coordinator.living_count()
    );
    println!("moving sprite at ({:.3}, {:.3}), saved at {saved_at:?}", position.x, position.y);
    for message in logging::drain(&log_recv) {
        println!("[{:>5}] {}: {}", message.level, message.target, message.message);
    }
}
