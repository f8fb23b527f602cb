//! The `MixerStream` contract implemented by decoders/generators fed into
//! the [`super::mixer::Mixer`].

use std::sync::Arc;

use crate::concurrency::LockFreeMessageQueue;

/// Upper bound on channels a single stream or the mixer itself may carry.
pub const MAX_AUDIO_CHANNELS: usize = 8;

/// Identity handed to a stream once it is installed into a mixer slot, so it
/// can tag events it pushes onto the shared message queue.
pub type StreamId = u64;

/// Implemented by anything the mixer can pull samples from: decoders,
/// synthesizers, the tone filter, or a [`super::resample::ResampledStream`]
/// wrapping one of those for sample-rate conversion.
///
/// Every method here may be called from the realtime audio thread and must
/// not allocate, lock, or block.
pub trait MixerStream: Send {
    /// Called once, off the audio thread, when the stream is installed into
    /// a mixer slot. `num_frames` is the maximum block size the backend will
    /// ever request in a single `accumulate_samples` call.
    fn setup(&mut self, output_rate: f32, channels: usize, num_frames: usize);

    /// Mix up to `num_frames` frames into `channels`, scaling by the
    /// per-channel `gain` the mixer computed from its gain/pan state.
    /// Returns the number of frames actually produced; a value less than
    /// `num_frames` signals end-of-stream/underrun and causes the mixer to
    /// retire the slot.
    fn accumulate_samples(&mut self, channels: &mut [&mut [f32]], gain: &[f32], num_frames: usize) -> usize;

    /// Sample rate this stream natively produces, before any resampling
    /// wrapper is applied.
    fn sample_rate(&self) -> f32;

    /// Channel count this stream natively produces.
    fn num_channels(&self) -> usize;

    /// Called once the mixer has retired the slot (killed, or ran dry).
    /// Streams that own heap state simply drop here; streams with external
    /// lifetime management (pooled, reference counted) can override to
    /// release themselves instead.
    fn dispose(self: Box<Self>) {}

    /// Install the stream's identity and a handle to the shared message
    /// queue, called by the mixer immediately before `setup`.
    fn install_message_queue(&mut self, _id: StreamId, _queue: Arc<LockFreeMessageQueue>) {}
}

/// A stream that always produces silence; useful as a placeholder and in
/// tests.
pub struct SilentStream {
    rate: f32,
    channels: usize,
}

impl SilentStream {
    /// Declare a silent stream at `rate`/`channels`; `setup` may still widen
    /// these if the mixer disagrees (it will not — silence is channel/rate
    /// agnostic, but we track what we were asked for to be a faithful stub).
    pub fn new(rate: f32, channels: usize) -> Self {
        Self { rate, channels }
    }
}

impl MixerStream for SilentStream {
    fn setup(&mut self, output_rate: f32, channels: usize, _num_frames: usize) {
        self.rate = output_rate;
        self.channels = channels;
    }

    fn accumulate_samples(&mut self, _channels: &mut [&mut [f32]], _gain: &[f32], num_frames: usize) -> usize {
        num_frames
    }

    fn sample_rate(&self) -> f32 {
        self.rate
    }

    fn num_channels(&self) -> usize {
        self.channels
    }
}
