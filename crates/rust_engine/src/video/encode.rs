//! Realtime encoder PTS policy and monotonic clamping.
//!
//! The GPU color-conversion dispatch and the libavcodec/PyroEnc submission
//! itself are feature-gated backend concerns; this module is the pure
//! timestamp arithmetic that governs them, always compiled and unit
//! tested without a real encoder.

/// Microsecond timebase `AV_TIME_BASE` matches.
const AV_TIME_BASE: i64 = 1_000_000;

/// Tracks realtime PTS for the "no explicit mux timestamps" path:
/// `sample_realtime_pts()` returns elapsed microseconds since the encoder
/// started, snapping to a keyframe-worthy jump when decode falls far behind
/// wall clock, otherwise nudging by one tick toward the measurement.
pub struct RealtimePtsTracker {
    start: std::time::Instant,
    last_pts_usec: i64,
    ticks_per_frame: i64,
    frame_num: i64,
    frame_den: i64,
}

/// What the realtime PTS policy decided for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtsDecision {
    /// The PTS (microseconds) to stamp this frame with.
    pub pts_usec: i64,
    /// `true` if the decision forces an IDR/keyframe due to a large jump.
    pub force_idr: bool,
}

impl RealtimePtsTracker {
    /// `frame_rate_num/den` is the nominal frame rate; `ticks_per_frame`
    /// sets the nudge granularity (16 is a typical choice).
    pub fn new(frame_rate_num: i64, frame_rate_den: i64, ticks_per_frame: i64) -> Self {
        Self {
            start: std::time::Instant::now(),
            last_pts_usec: 0,
            ticks_per_frame,
            frame_num: frame_rate_num,
            frame_den: frame_rate_den,
        }
    }

    fn expected_increment_usec(&self) -> i64 {
        (AV_TIME_BASE * self.frame_den) / (self.frame_num * self.ticks_per_frame)
    }

    /// Elapsed microseconds since the tracker was created.
    pub fn elapsed_usec(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }

    /// Decide the PTS for the next encoded frame given the measured
    /// elapsed time. Call once per encoded frame.
    pub fn next_pts(&mut self) -> PtsDecision {
        self.next_pts_at(self.elapsed_usec())
    }

    /// Same as [`Self::next_pts`] but takes the measured elapsed time
    /// explicitly, for deterministic testing.
    pub fn next_pts_at(&mut self, measured_usec: i64) -> PtsDecision {
        let increment = self.expected_increment_usec();
        let expected = self.last_pts_usec + increment;
        let delta = measured_usec - expected;

        let decision = if delta.abs() > increment * 8 {
            PtsDecision {
                pts_usec: measured_usec,
                force_idr: true,
            }
        } else {
            let nudge = increment / self.ticks_per_frame;
            let nudged = if delta > 0 {
                expected + nudge.min(delta)
            } else if delta < 0 {
                expected + nudge.max(delta)
            } else {
                expected
            };
            PtsDecision {
                pts_usec: nudged,
                force_idr: false,
            }
        };

        self.last_pts_usec = decision.pts_usec;
        decision
    }

    /// Low-latency passthrough policy: use the mux callback's PTS
    /// unmodified, only bumping by one tick if it would otherwise equal the
    /// previous frame's (monotonic enforcement).
    pub fn passthrough(&mut self, mux_pts_usec: i64) -> i64 {
        let pts = if mux_pts_usec <= self.last_pts_usec {
            self.last_pts_usec + 1
        } else {
            mux_pts_usec
        };
        self.last_pts_usec = pts;
        pts
    }
}

/// Clamp an audio encode PTS (microseconds) to stay within
/// `[previous + 990_000/sr, previous + 1_010_000/sr]` frame-duration
/// tolerance, resetting outright if the gap exceeds 200ms.
pub fn clamp_audio_pts(previous_usec: i64, measured_usec: i64, sample_rate: f64, samples_per_frame: f64) -> i64 {
    let nominal = (samples_per_frame / sample_rate * 1_000_000.0) as i64;
    let low = previous_usec + (nominal as f64 * 0.990) as i64;
    let high = previous_usec + (nominal as f64 * 1.010) as i64;

    if (measured_usec - previous_usec).abs() as i64 > 200_000 {
        return measured_usec;
    }
    measured_usec.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudges_toward_measurement_within_tolerance() {
        let mut tracker = RealtimePtsTracker::new(30, 1, 16);
        let first = tracker.next_pts_at(0);
        assert_eq!(first.pts_usec, 0);
        assert!(!first.force_idr);

        let increment = tracker.expected_increment_usec();
        // Slightly ahead of schedule; should nudge, not jump fully.
        let second = tracker.next_pts_at(increment + increment / 32);
        assert!(second.pts_usec > increment);
        assert!(second.pts_usec < increment + increment / 32);
        assert!(!second.force_idr);
    }

    #[test]
    fn forces_idr_on_large_jump() {
        let mut tracker = RealtimePtsTracker::new(30, 1, 16);
        tracker.next_pts_at(0);
        let increment = tracker.expected_increment_usec();
        let decision = tracker.next_pts_at(increment * 20);
        assert!(decision.force_idr);
        assert_eq!(decision.pts_usec, increment * 20);
    }

    #[test]
    fn passthrough_bumps_equal_timestamps() {
        let mut tracker = RealtimePtsTracker::new(30, 1, 16);
        assert_eq!(tracker.passthrough(1000), 1000);
        assert_eq!(tracker.passthrough(1000), 1001);
        assert_eq!(tracker.passthrough(2000), 2000);
    }

    #[test]
    fn audio_pts_clamped_within_frame_tolerance() {
        let previous = 0;
        let sample_rate = 48_000.0;
        let samples_per_frame = 1024.0;
        let nominal = (samples_per_frame / sample_rate * 1_000_000.0) as i64;

        let clamped = clamp_audio_pts(previous, nominal * 2, sample_rate, samples_per_frame);
        assert!(clamped <= previous + (nominal as f64 * 1.010) as i64);
    }

    #[test]
    fn audio_pts_resets_on_large_gap() {
        let clamped = clamp_audio_pts(0, 500_000, 48_000.0, 1024.0);
        assert_eq!(clamped, 500_000);
    }
}
