//! Fixed-slot, wait-free-on-the-audio-thread stream mixer.
//!
//! The audio thread only ever touches per-slot atomics inside
//! [`AudioMixer::mix_samples`]; everything else (`add_mixer_stream`,
//! `kill_stream`, `pause_stream`, …) takes a single non-critical mutex since
//! it runs from ordinary threads. `mix_samples` itself zeroes the channel
//! buffers it is given before accumulating into them, rather than trusting
//! the caller to have pre-zeroed them.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::audio::events::{StreamEvent, STREAM_EVENT_STOPPED_TAG};
use crate::audio::resample::{Quality, ResampledStream};
use crate::audio::stream::{MixerStream, StreamId, MAX_AUDIO_CHANNELS};
use crate::concurrency::LockFreeMessageQueue;

/// Fixed slot count; must stay a power of two (`StreamID`'s index field
/// depends on it).
pub const MAX_SOURCES: usize = 128;
const WORDS: usize = MAX_SOURCES / 32;

fn f32_to_bits(v: f32) -> u32 {
    v.to_bits()
}

fn bits_to_f32(v: u32) -> f32 {
    f32::from_bits(v)
}

fn saturate(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Playback state of a mixer slot as observed by a public API caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Slot does not exist, or the `StreamID` is stale (generation mismatch).
    Dead,
    /// Installed and actively mixed.
    Playing,
    /// Installed but `stream_playing` is false.
    Paused,
}

struct Slot {
    stream: Mutex<Option<Box<dyn MixerStream>>>,
    gain_linear: AtomicU32,
    panning: AtomicU32,
    playing: AtomicBool,
    raw_cursor: AtomicU64,
    adjusted_cursor_usec: AtomicU64,
    generation: AtomicU32,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            stream: Mutex::new(None),
            gain_linear: AtomicU32::new(f32_to_bits(1.0)),
            panning: AtomicU32::new(f32_to_bits(0.0)),
            playing: AtomicBool::new(false),
            raw_cursor: AtomicU64::new(0),
            adjusted_cursor_usec: AtomicU64::new(0),
            generation: AtomicU32::new(0),
        }
    }
}

/// The realtime mixer. Construct once, call [`Self::set_backend_parameters`]
/// then [`Self::on_backend_start`] before the audio callback begins calling
/// [`Self::mix_samples`].
pub struct AudioMixer {
    slots: Vec<Slot>,
    active_mask: [AtomicU32; WORDS],
    non_critical: Mutex<()>,
    sample_rate: f32,
    num_channels: usize,
    max_num_samples: usize,
    latency_usec: AtomicU32,
    is_active: AtomicBool,
    message_queue: Arc<LockFreeMessageQueue>,
    #[allow(clippy::type_complexity)]
    event_callback: Mutex<Option<Box<dyn FnMut(StreamEvent) + Send>>>,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    /// Construct an inactive mixer with no backend parameters set yet.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(MAX_SOURCES);
        slots.resize_with(MAX_SOURCES, Slot::default);
        Self {
            slots,
            active_mask: std::array::from_fn(|_| AtomicU32::new(0)),
            non_critical: Mutex::new(()),
            sample_rate: 48_000.0,
            num_channels: 2,
            max_num_samples: 0,
            latency_usec: AtomicU32::new(0),
            is_active: AtomicBool::new(false),
            message_queue: Arc::new(LockFreeMessageQueue::new()),
            event_callback: Mutex::new(None),
        }
    }

    /// Install an optional best-effort lifecycle callback. Called from the
    /// audio thread for `Stopped` and from `add_mixer_stream`'s caller
    /// thread for `Started`; keep it cheap and non-blocking.
    pub fn set_event_callback(&self, callback: Box<dyn FnMut(StreamEvent) + Send>) {
        *self.event_callback.lock().unwrap() = Some(callback);
    }

    /// Configure the backend's sample rate/channel count/max block size.
    /// Must be called before `on_backend_start`.
    pub fn set_backend_parameters(&mut self, sample_rate: f32, channels: usize, max_num_samples: usize) {
        self.sample_rate = sample_rate;
        self.num_channels = channels.min(MAX_AUDIO_CHANNELS);
        self.max_num_samples = max_num_samples;
    }

    /// Mark the mixer active; called once the audio backend's stream opens.
    pub fn on_backend_start(&self) {
        self.is_active.store(true, Ordering::Release);
    }

    /// Mark the mixer inactive and dispose every dead stream; called once
    /// the audio backend's stream is torn down.
    pub fn on_backend_stop(&self) {
        self.dispose_dead_streams();
        self.is_active.store(false, Ordering::Release);
    }

    /// Current estimated output latency, used to bias the adjusted play
    /// cursor.
    pub fn set_latency_usec(&self, usec: u32) {
        self.latency_usec.store(usec, Ordering::Release);
    }

    /// Shared queue streams can push lifecycle/debug events onto.
    pub fn message_queue(&self) -> Arc<LockFreeMessageQueue> {
        self.message_queue.clone()
    }

    fn stream_index(id: StreamId) -> usize {
        (id as usize) & (MAX_SOURCES - 1)
    }

    fn stream_generation_of(id: StreamId) -> u32 {
        (id / MAX_SOURCES as u64) as u32
    }

    fn generate_stream_id(&self, index: usize) -> StreamId {
        let generation = self.slots[index].generation.fetch_add(1, Ordering::AcqRel) + 1;
        u64::from(generation) * MAX_SOURCES as u64 + index as u64
    }

    fn verify_stream_id(&self, id: StreamId) -> bool {
        if id == 0 {
            return false;
        }
        let index = Self::stream_index(id);
        let generation = Self::stream_generation_of(id);
        self.slots[index].generation.load(Ordering::Acquire) == generation
    }

    /// Install a stream into the first vacant slot. Wraps it transparently
    /// in a [`ResampledStream`] if its native rate differs from the mixer's.
    /// Returns `None` if the stream's channel count does not match the
    /// mixer's, or if every slot is occupied.
    pub fn add_mixer_stream(
        &self,
        stream: Box<dyn MixerStream>,
        start_playing: bool,
        initial_gain_db: f32,
        initial_panning: f32,
    ) -> Option<StreamId> {
        if stream.num_channels() != self.num_channels {
            log::error!("number of audio channels in stream does not match mixer");
            return None;
        }

        let _guard = self.non_critical.lock().unwrap();

        for word in 0..WORDS {
            let vacant = !self.active_mask[word].load(Ordering::Acquire);
            if vacant == 0 {
                continue;
            }
            let subindex = vacant.trailing_zeros();
            let index = word * 32 + subindex as usize;

            let id = self.generate_stream_id(index);
            let mut stream = stream;
            stream.install_message_queue(id, self.message_queue.clone());
            stream.setup(self.sample_rate, self.num_channels, self.max_num_samples);

            if (stream.sample_rate() - self.sample_rate).abs() > f32::EPSILON {
                let mut resampled = ResampledStream::new(stream, Quality::Medium);
                resampled.setup(self.sample_rate, self.num_channels, self.max_num_samples);
                stream = Box::new(resampled);
            }

            let slot = &self.slots[index];
            *slot.stream.lock().unwrap() = Some(stream);
            slot.raw_cursor.store(0, Ordering::Relaxed);
            slot.adjusted_cursor_usec.store(0, Ordering::Relaxed);
            slot.gain_linear.store(f32_to_bits(db_to_linear(initial_gain_db)), Ordering::Relaxed);
            slot.panning.store(f32_to_bits(initial_panning), Ordering::Relaxed);
            slot.playing.store(start_playing, Ordering::Relaxed);

            // Release-publish the active bit last so the audio thread only
            // ever observes a fully-initialized slot.
            self.active_mask[word].fetch_or(1 << subindex, Ordering::Release);

            if let Some(cb) = self.event_callback.lock().unwrap().as_mut() {
                cb(StreamEvent::Started(id));
            }

            return Some(id);
        }

        log::warn!("no vacant mixer slot available");
        None
    }

    /// Remove `id` from the active set. No-op on an invalid/stale id.
    pub fn kill_stream(&self, id: StreamId) {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return;
        }
        let index = Self::stream_index(id);
        self.active_mask[index / 32].fetch_and(!(1 << (index % 32)), Ordering::Release);
    }

    /// Resume mixing a paused (but still installed) stream.
    pub fn play_stream(&self, id: StreamId) -> bool {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return false;
        }
        self.slots[Self::stream_index(id)].playing.store(true, Ordering::Release);
        true
    }

    /// Pause a stream without removing it from its slot.
    pub fn pause_stream(&self, id: StreamId) -> bool {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return false;
        }
        self.slots[Self::stream_index(id)].playing.store(false, Ordering::Release);
        true
    }

    /// Update a stream's gain (dB) and pan (`[-1, 1]`).
    pub fn set_stream_mixer_parameters(&self, id: StreamId, gain_db: f32, panning: f32) {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return;
        }
        let index = Self::stream_index(id);
        self.slots[index].gain_linear.store(f32_to_bits(db_to_linear(gain_db)), Ordering::Release);
        self.slots[index].panning.store(f32_to_bits(panning), Ordering::Release);
    }

    /// Latency-compensated play cursor, in seconds. `-1.0` on invalid id.
    pub fn get_play_cursor(&self, id: StreamId) -> f64 {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return -1.0;
        }
        let index = Self::stream_index(id);
        self.slots[index].adjusted_cursor_usec.load(Ordering::Acquire) as f64 * 1e-6
    }

    /// Current playback state.
    pub fn get_stream_state(&self, id: StreamId) -> StreamState {
        let _guard = self.non_critical.lock().unwrap();
        if !self.verify_stream_id(id) {
            return StreamState::Dead;
        }
        let index = Self::stream_index(id);
        let bit_set = self.active_mask[index / 32].load(Ordering::Acquire) & (1 << (index % 32)) != 0;
        if !bit_set {
            return StreamState::Dead;
        }
        if self.slots[index].playing.load(Ordering::Relaxed) {
            StreamState::Playing
        } else {
            StreamState::Paused
        }
    }

    fn update_stream_play_cursor(&self, index: usize, new_latency_secs: f64) {
        let raw = self.slots[index].raw_cursor.load(Ordering::Relaxed);
        let mut t = (raw as f64) / f64::from(self.sample_rate) - new_latency_secs;
        if t < 0.0 {
            t = 0.0;
        }
        let t_usec = (t * 1e6) as u64;
        let old = self.slots[index].adjusted_cursor_usec.load(Ordering::Relaxed);
        if t_usec > old {
            self.slots[index].adjusted_cursor_usec.store(t_usec, Ordering::Release);
        }
    }

    /// Realtime mix entry point: called by the audio backend once per
    /// callback. Zeroes `channels`, then accumulates every active, playing
    /// stream into them. No allocation, no blocking lock, bounded work.
    pub fn mix_samples(&self, channels: &mut [&mut [f32]], num_frames: usize) {
        for channel in channels.iter_mut() {
            channel[..num_frames].fill(0.0);
        }

        let current_latency = f64::from(self.latency_usec.load(Ordering::Acquire)) * 1e-6;

        for word in 0..WORDS {
            let active_mask = self.active_mask[word].load(Ordering::Acquire);
            if active_mask == 0 {
                continue;
            }

            let mut dead_mask = 0u32;
            let mut remaining = active_mask;
            while remaining != 0 {
                let bit = remaining.trailing_zeros();
                remaining &= remaining - 1;
                let index = word * 32 + bit as usize;

                if !self.slots[index].playing.load(Ordering::Acquire) {
                    continue;
                }

                let gain = bits_to_f32(self.slots[index].gain_linear.load(Ordering::Relaxed));
                let pan = bits_to_f32(self.slots[index].panning.load(Ordering::Relaxed));

                let mut gains = [0.0f32; MAX_AUDIO_CHANNELS];
                if self.num_channels != 2 {
                    gains[..self.num_channels].fill(gain);
                } else {
                    gains[0] = gain * saturate(1.0 - pan);
                    gains[1] = gain * saturate(1.0 + pan);
                }

                let got = {
                    let mut guard = self.slots[index].stream.lock().unwrap();
                    match guard.as_mut() {
                        Some(stream) => stream.accumulate_samples(channels, &gains[..self.num_channels], num_frames),
                        None => 0,
                    }
                };

                self.slots[index].raw_cursor.fetch_add(got as u64, Ordering::Relaxed);
                self.update_stream_play_cursor(index, current_latency);

                if got < num_frames {
                    dead_mask |= 1 << bit;
                    let id = u64::from(self.slots[index].generation.load(Ordering::Acquire)) * MAX_SOURCES as u64
                        + index as u64;

                    let mut payload = self.message_queue.allocate_write_payload(1 + std::mem::size_of::<u64>());
                    payload.bytes_mut().push(STREAM_EVENT_STOPPED_TAG);
                    payload.bytes_mut().extend_from_slice(&id.to_le_bytes());
                    self.message_queue.push_written_payload(payload);

                    if let Some(cb) = self.event_callback.lock().unwrap().as_mut() {
                        cb(StreamEvent::Stopped(id));
                    }
                }
            }

            self.active_mask[word].fetch_and(!dead_mask, Ordering::Release);
        }
    }

    /// Free the `MixerStream` behind every slot whose active bit is clear,
    /// resetting its generation so stale `StreamID`s stay invalid.
    pub fn dispose_dead_streams(&self) {
        let _guard = self.non_critical.lock().unwrap();
        for word in 0..WORDS {
            let dead_mask = !self.active_mask[word].load(Ordering::Acquire);
            let mut remaining = dead_mask;
            while remaining != 0 {
                let bit = remaining.trailing_zeros();
                remaining &= remaining - 1;
                let index = word * 32 + bit as usize;
                let mut guard = self.slots[index].stream.lock().unwrap();
                if guard.take().is_some() {
                    self.slots[index].generation.store(0, Ordering::Release);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantStream {
        rate: f32,
        channels: usize,
        value: f32,
        frames_left: usize,
    }

    impl MixerStream for ConstantStream {
        fn setup(&mut self, output_rate: f32, channels: usize, _num_frames: usize) {
            self.rate = output_rate;
            self.channels = channels;
        }

        fn accumulate_samples(&mut self, channels: &mut [&mut [f32]], gain: &[f32], num_frames: usize) -> usize {
            let produce = num_frames.min(self.frames_left);
            for (c, g) in gain.iter().enumerate() {
                for sample in &mut channels[c][..produce] {
                    *sample += self.value * g;
                }
            }
            self.frames_left -= produce;
            produce
        }

        fn sample_rate(&self) -> f32 {
            self.rate
        }

        fn num_channels(&self) -> usize {
            self.channels
        }
    }

    #[test]
    fn s3_mixer_stereo_pan() {
        let mut mixer = AudioMixer::new();
        mixer.set_backend_parameters(48_000.0, 2, 64);
        mixer.on_backend_start();

        let stream = ConstantStream {
            rate: 48_000.0,
            channels: 2,
            value: 1.0,
            frames_left: usize::MAX,
        };
        let id = mixer
            .add_mixer_stream(Box::new(stream), true, 0.0, 1.0)
            .expect("slot available");
        assert!(mixer.verify_stream_id(id));

        let mut left = vec![0.0f32; 64];
        let mut right = vec![0.0f32; 64];
        {
            let mut channels: Vec<&mut [f32]> = vec![&mut left, &mut right];
            mixer.mix_samples(&mut channels, 64);
        }

        for &l in &left {
            assert!(l.abs() < 1e-6, "expected L≈0, got {l}");
        }
        for &r in &right {
            assert!((r - 1.0).abs() < 1e-6, "expected R≈1.0, got {r}");
        }
    }

    #[test]
    fn invariant_kill_then_dispose_makes_stream_dead() {
        let mut mixer = AudioMixer::new();
        mixer.set_backend_parameters(48_000.0, 2, 64);

        let stream = ConstantStream {
            rate: 48_000.0,
            channels: 2,
            value: 0.0,
            frames_left: usize::MAX,
        };
        let id = mixer.add_mixer_stream(Box::new(stream), true, 0.0, 0.0).unwrap();

        mixer.kill_stream(id);
        assert_eq!(mixer.get_stream_state(id), StreamState::Dead);
        mixer.dispose_dead_streams();
        assert_eq!(mixer.get_stream_state(id), StreamState::Dead);
        assert_eq!(mixer.get_play_cursor(id), -1.0);

        // No side effects on a dead id.
        mixer.set_stream_mixer_parameters(id, -6.0, 0.5);
        assert!(!mixer.play_stream(id));
    }

    #[test]
    fn dead_stream_retired_when_it_runs_dry() {
        let mut mixer = AudioMixer::new();
        mixer.set_backend_parameters(48_000.0, 2, 64);

        let stream = ConstantStream {
            rate: 48_000.0,
            channels: 2,
            value: 1.0,
            frames_left: 10,
        };
        let id = mixer.add_mixer_stream(Box::new(stream), true, 0.0, 0.0).unwrap();

        let mut left = vec![0.0f32; 64];
        let mut right = vec![0.0f32; 64];
        {
            let mut channels: Vec<&mut [f32]> = vec![&mut left, &mut right];
            mixer.mix_samples(&mut channels, 64);
        }

        assert_eq!(mixer.get_stream_state(id), StreamState::Dead);

        let queue = mixer.message_queue();
        let message = queue.read_message().expect("stopped event queued");
        assert_eq!(StreamEvent::decode(message.bytes()), Some(StreamEvent::Stopped(id)));
    }
}
