extern crate self as sprite_engine;

pub mod ecs;
pub mod logging;
pub mod scene;
