//! Resource management
//!
//! This module contains passive resource management systems including
//! materials, pipelines, and shared rendering resources.

pub mod materials;
pub mod pipelines;
pub mod shared;
