//! ECS Components module
//! 
//! Contains all engine components following Game Engine Architecture principles

pub mod lighting;
pub mod transform;

pub use lighting::{LightComponent, LightType, LightFactory};
pub use transform::{TransformComponent, TransformFactory};
