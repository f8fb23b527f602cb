//! DSP building blocks used by audio streams beyond plain mixing.

pub mod tone_filter;

pub use tone_filter::{ToneFilter, TONE_COUNT};
