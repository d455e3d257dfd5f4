//! Benchmark utilities for the sprite engine ECS.
//!
//! Microbenchmarks for the coordinator live in `benches/ecs_micro.rs`: entity churn, component
//! add/remove, system membership fan-out and snapshot encode/decode.
//!
//! ```bash
//! cargo bench -p sprite_bench
//! cargo bench -p sprite_bench -- snapshot
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

pub mod components;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sprite_engine::ecs::{Config, Coordinator, Entity};

use crate::components::{Health, Position, Tag, Velocity};

/// A coordinator with every benchmark component registered and room for `capacity` entities.
pub fn coordinator(capacity: u32) -> Coordinator {
    let mut coordinator = Coordinator::with_config(Config::DEFAULT.with_max_entities(capacity));
    coordinator.register_persistent_component::<Position>();
    coordinator.register_persistent_component::<Velocity>();
    coordinator.register_component::<Health>();
    coordinator.register_component::<Tag>();
    coordinator
}

/// Spawn `count` entities with seeded random positions. Roughly half also move, and a quarter are
/// tagged.
pub fn populate(coordinator: &mut Coordinator, count: usize, seed: u64) -> Vec<Entity> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let entity = coordinator.create_entity();
            coordinator.add_component(
                entity,
                Position {
                    x: rng.gen_range(-100.0..100.0),
                    y: rng.gen_range(-100.0..100.0),
                },
            );
            if rng.gen_bool(0.5) {
                coordinator.add_component(
                    entity,
                    Velocity {
                        dx: rng.gen_range(-1.0..1.0),
                        dy: rng.gen_range(-1.0..1.0),
                    },
                );
            }
            if rng.gen_bool(0.25) {
                coordinator.add_component(entity, Tag);
            }
            entity
        })
        .collect()
}
