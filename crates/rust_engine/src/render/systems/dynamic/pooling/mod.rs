//! Resource pooling sub-system
//!
//! Pool coordination and mesh-specific resource pooling.

pub mod pool_manager;
pub mod resource_pool;

pub use pool_manager::*;
pub use resource_pool::*;
