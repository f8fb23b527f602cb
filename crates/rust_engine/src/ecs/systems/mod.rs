//! ECS Systems module

pub mod lighting;
pub mod coordinate_validation_simple;

pub use lighting::LightingSystem;
pub use coordinate_validation_simple::CoordinateSystemValidator;
