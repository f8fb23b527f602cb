//! Realtime audio: a fixed-slot mixer, streams, DSP, and sample-rate
//! conversion.

pub mod dsp;
pub mod events;
pub mod mixer;
pub mod resample;
pub mod stream;

pub use events::StreamEvent;
pub use mixer::{AudioMixer, StreamState, MAX_SOURCES};
pub use resample::{Quality, ResampledStream, SincResampler};
pub use stream::{MixerStream, SilentStream, StreamId, MAX_AUDIO_CHANNELS};
