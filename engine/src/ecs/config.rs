/// Default upper bound on the number of live entities.
pub const MAX_ENTITIES: u32 = 5000;

/// Default upper bound on the number of registered component types. This is also the width of
/// every [`Signature`](crate::ecs::Signature).
pub const MAX_COMPONENTS: usize = 100;

/// Capacity limits for a [`Coordinator`](crate::ecs::Coordinator).
///
/// Both limits are hard: exceeding either one is a caller bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entities alive at the same time. Ids are drawn from `[0, max_entities)`.
    pub max_entities: u32,

    /// Maximum number of component types that can be registered.
    pub max_components: usize,
}

impl Config {
    /// The limits used by [`Coordinator::new`](crate::ecs::Coordinator::new).
    pub const DEFAULT: Self = Self {
        max_entities: MAX_ENTITIES,
        max_components: MAX_COMPONENTS,
    };

    /// Replace the entity limit.
    #[inline]
    pub const fn with_max_entities(mut self, max_entities: u32) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Replace the component type limit.
    #[inline]
    pub const fn with_max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
