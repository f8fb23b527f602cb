//! Active rendering systems
//!
//! This module contains stateful runtime systems that coordinate rendering,
//! including lighting, batching, dynamic object management, and text rendering.

pub mod lighting;
pub mod batching;
pub mod dynamic;
pub mod text;
