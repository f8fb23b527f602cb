//! Renderer configuration types
//!
//! This module contains configuration structures for renderer setup and customization.

pub mod renderer_config;
pub mod shader_config;

pub use renderer_config::*;
pub use shader_config::*;
