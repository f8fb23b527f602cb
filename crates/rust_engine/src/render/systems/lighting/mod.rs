//! Lighting system
//!
//! Active lighting management including light types, environments, and UBO updates.

pub mod lighting;

// Re-export all lighting types
pub use lighting::*;
