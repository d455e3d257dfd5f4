//! The entity-component runtime.
//!
//! Everything in here is reached through a [`Coordinator`], which composes three registries:
//!
//! - [`entity::Registry`]: issues and recycles [`Entity`] identifiers and owns each entity's
//!   [`Signature`].
//! - [`component::Registry`]: assigns component type ids and owns one dense
//!   [`component::Store`] per registered type.
//! - [`system::Registry`]: owns the registered [`System`]s and keeps each system's member set in
//!   sync with entity signatures.
//!
//! Persistence of component data lives in [`persist`].
//!
//! ```rust,ignore
//! use sprite_engine::ecs::Coordinator;
//! use sprite_engine::scene::{SpriteRenderSystem, TransformComponent};
//!
//! let mut coordinator = Coordinator::new();
//! coordinator.register_persistent_component::<TransformComponent>();
//!
//! let sprites = coordinator.register_system(SpriteRenderSystem::default());
//! let signature = coordinator.signature_of::<TransformComponent>();
//! coordinator.set_system_signature::<SpriteRenderSystem>(signature);
//!
//! let entity = coordinator.create_entity();
//! coordinator.add_component(entity, TransformComponent::at(1.0, 2.0, 4));
//! assert!(sprites.borrow().members().contains(entity));
//! ```

pub mod component;
mod config;
mod coordinator;
pub mod entity;
pub mod persist;
mod signature;
pub(crate) mod storage;
pub mod system;
pub(crate) mod util;

pub use component::Component;
pub use config::{Config, MAX_COMPONENTS, MAX_ENTITIES};
pub use coordinator::Coordinator;
pub use entity::Entity;
pub use persist::{LoadReport, Persist, PersistError};
pub use signature::{IntoSignature, Signature};
pub use system::{Members, System};
