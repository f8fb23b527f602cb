//! Video decode ring state machine and audio/video PTS sync.
//!
//! The actual demuxing/decoding (libavformat/libavcodec via `ffmpeg-next`)
//! is feature-gated behind `video` and lives in [`super::ffmpeg_backend`];
//! this module is the engine-agnostic ring buffer and timestamp-smoothing
//! logic, which is plain arithmetic and always compiled.

use thiserror::Error;

/// Failure modes surfaced by the decode pipeline's public API. Most
/// expected conditions (EOF, timeout, empty ring) are plain return values,
/// not errors.
#[derive(Debug, Error)]
pub enum VideoDecodeError {
    /// `seek` was called before the decoder finished initializing.
    #[error("seek attempted before decoder initialization completed")]
    NotInitialized,
}

/// State of one decoded-frame ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Free to decode into.
    Idle,
    /// Reserved by the in-flight decode/upload task; not yet displayable.
    Locked,
    /// Decoded and uploaded; available for `acquire_video_frame`.
    Ready,
    /// Handed to a caller via `acquire_video_frame`; returns to `Idle` on
    /// release.
    Acquired,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    state: SlotState,
    pts_seconds: f64,
    idle_order: u64,
    lock_order: u64,
}

/// Outcome of trying to acquire a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireResult {
    /// A frame was returned; carries the slot index.
    Got(usize),
    /// The ring currently has nothing ready.
    Empty,
    /// The stream has ended and nothing will ever become ready again.
    Eof,
}

/// Fixed-size ring of decode slots cycling `Idle → Locked → Ready →
/// Acquired → Idle`.
pub struct DecodeRing {
    slots: Vec<Slot>,
    order_counter: u64,
    eof: bool,
}

impl DecodeRing {
    /// Build a ring with `depth` slots, all `Idle`.
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![
                Slot {
                    state: SlotState::Idle,
                    pts_seconds: 0.0,
                    idle_order: 0,
                    lock_order: 0,
                };
                depth
            ],
            order_counter: 0,
            eof: false,
        }
    }

    /// Mark the stream exhausted; future acquires return `Eof` once the
    /// ring drains.
    pub fn mark_eof(&mut self) {
        self.eof = true;
    }

    /// Pick a slot for the decode thread to lock and begin filling: the
    /// lowest-`idle_order` `Idle` slot if one exists, otherwise the
    /// lowest-PTS `Ready` slot (trampled, with a warning — the oldest
    /// decoded frame nobody consumed yet is sacrificed to keep decoding).
    pub fn lock_slot_for_decode(&mut self) -> Option<usize> {
        if let Some((index, _)) = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state == SlotState::Idle)
            .min_by_key(|(_, s)| s.idle_order)
        {
            self.order_counter += 1;
            self.slots[index].state = SlotState::Locked;
            self.slots[index].lock_order = self.order_counter;
            return Some(index);
        }

        if let Some((index, _)) = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state == SlotState::Ready)
            .min_by(|(_, a), (_, b)| a.pts_seconds.total_cmp(&b.pts_seconds))
        {
            log::warn!("decode ring: trampling ready slot {index} (no idle slots available)");
            self.order_counter += 1;
            self.slots[index].state = SlotState::Locked;
            self.slots[index].lock_order = self.order_counter;
            return Some(index);
        }

        None
    }

    /// Publish a locked slot as `Ready` with its decoded frame's PTS.
    /// Ready-order equals decode order because callers serialize their
    /// upload tasks behind a dummy dependency before calling this.
    pub fn publish_ready(&mut self, slot: usize, pts_seconds: f64) {
        self.slots[slot].state = SlotState::Ready;
        self.slots[slot].pts_seconds = pts_seconds;
    }

    /// Non-blocking acquire: returns the lowest-PTS `Ready` slot, if any.
    pub fn try_acquire(&mut self) -> AcquireResult {
        let ready = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state == SlotState::Ready)
            .min_by(|(_, a), (_, b)| a.pts_seconds.total_cmp(&b.pts_seconds))
            .map(|(index, _)| index);

        match ready {
            Some(index) => {
                self.slots[index].state = SlotState::Acquired;
                AcquireResult::Got(index)
            }
            None if self.eof => AcquireResult::Eof,
            None => AcquireResult::Empty,
        }
    }

    /// Return an acquired slot to `Idle`, making it available for decode
    /// again.
    pub fn release(&mut self, slot: usize) {
        self.order_counter += 1;
        self.slots[slot].state = SlotState::Idle;
        self.slots[slot].idle_order = self.order_counter;
    }

    /// PTS of a `Ready`/`Acquired` slot.
    pub fn pts_seconds(&self, slot: usize) -> f64 {
        self.slots[slot].pts_seconds
    }

    /// Current state of `slot`.
    pub fn state(&self, slot: usize) -> SlotState {
        self.slots[slot].state
    }
}

/// EMA-smoothed audio/video playback clock: biases gently toward the raw
/// measured PTS each call, but snaps immediately on a large discrepancy
/// (a seek, a stall).
#[derive(Debug, Clone, Copy)]
pub struct SmoothedClock {
    smoothed_seconds: Option<f64>,
}

impl SmoothedClock {
    /// No measurement latched yet.
    pub fn new() -> Self {
        Self { smoothed_seconds: None }
    }

    /// Advance the clock by `elapsed_seconds`, then reconcile against
    /// `raw_seconds`: snap if the two disagree by more than 0.25s, else
    /// nudge 0.5% of the way toward the raw value.
    pub fn advance(&mut self, elapsed_seconds: f64, raw_seconds: f64) -> f64 {
        let advanced = match self.smoothed_seconds {
            None => raw_seconds,
            Some(prev) => {
                let candidate = prev + elapsed_seconds;
                if (candidate - raw_seconds).abs() > 0.25 {
                    raw_seconds
                } else {
                    candidate + (raw_seconds - candidate) * 0.005
                }
            }
        };
        self.smoothed_seconds = Some(advanced);
        advanced
    }
}

impl Default for SmoothedClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Piecewise audio resampler rate-correction factor: large A/V deltas get
/// a fixed ±0.5% nudge, small ones scale linearly.
pub fn audio_delta_rate_factor(delta_seconds: f64) -> f64 {
    if delta_seconds.abs() > 0.1 {
        0.005 * delta_seconds.signum()
    } else {
        0.05 * delta_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_slot_prefers_idle_over_trampling_ready() {
        let mut ring = DecodeRing::new(2);
        let first = ring.lock_slot_for_decode().unwrap();
        ring.publish_ready(first, 1.0);
        let second = ring.lock_slot_for_decode().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn lock_slot_tramples_lowest_pts_ready_when_full() {
        let mut ring = DecodeRing::new(1);
        let slot = ring.lock_slot_for_decode().unwrap();
        ring.publish_ready(slot, 5.0);
        let trampled = ring.lock_slot_for_decode().unwrap();
        assert_eq!(trampled, slot);
    }

    #[test]
    fn try_acquire_returns_lowest_pts_first() {
        let mut ring = DecodeRing::new(2);
        let a = ring.lock_slot_for_decode().unwrap();
        ring.publish_ready(a, 2.0);
        let b = ring.lock_slot_for_decode().unwrap();
        ring.publish_ready(b, 1.0);

        match ring.try_acquire() {
            AcquireResult::Got(slot) => assert_eq!(ring.pts_seconds(slot), 1.0),
            other => panic!("expected Got, found {other:?}"),
        }
    }

    #[test]
    fn try_acquire_reports_eof_once_drained() {
        let mut ring = DecodeRing::new(1);
        ring.mark_eof();
        assert_eq!(ring.try_acquire(), AcquireResult::Eof);
    }

    #[test]
    fn try_acquire_reports_empty_before_eof() {
        let mut ring = DecodeRing::new(1);
        assert_eq!(ring.try_acquire(), AcquireResult::Empty);
    }

    #[test]
    fn smoothed_clock_snaps_on_large_discrepancy() {
        let mut clock = SmoothedClock::new();
        assert_eq!(clock.advance(0.0, 10.0), 10.0);
        let snapped = clock.advance(0.1, 20.0);
        assert_eq!(snapped, 20.0);
    }

    #[test]
    fn smoothed_clock_nudges_toward_raw_on_small_discrepancy() {
        let mut clock = SmoothedClock::new();
        clock.advance(0.0, 10.0);
        let nudged = clock.advance(1.0, 11.1);
        // advanced to 11.0, then biased 0.5% toward 11.1.
        assert!((nudged - 11.0005).abs() < 1e-9);
    }

    #[test]
    fn rate_factor_is_fixed_above_threshold_and_linear_below() {
        assert!((audio_delta_rate_factor(0.2) - 0.005).abs() < 1e-9);
        assert!((audio_delta_rate_factor(-0.2) + 0.005).abs() < 1e-9);
        assert!((audio_delta_rate_factor(0.02) - 0.001).abs() < 1e-9);
    }
}
