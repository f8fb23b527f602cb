//! Physics module for collision detection and response
//!
//! Provides collision detection using spatial partitioning (octree/quadtree)
//! and basic collision response for common shapes.

pub mod collision;

pub use collision::{
    CollisionSystem,
    CollisionShape,
    CollisionEvent,
    BoundingSphere,
};

/// Physics system placeholder
pub struct PhysicsSystem {
    _enabled: bool,
}

impl PhysicsSystem {
    /// Create a new physics system
    pub fn new() -> Self {
        Self { _enabled: false }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}
