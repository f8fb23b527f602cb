//! Per-semitone bank of resonator filters driving "tone visualizer" audio
//! streams. Each tone's resonator is a [`biquad`] bandpass filter, the
//! crate the rest of this codebase's DSP reaches for.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, Hertz, ToHertz, Type, Q_BUTTERWORTH_F32};

/// 48 logarithmically-spaced tones, one per semitone across four octaves
/// centered on the tuning frequency.
pub const TONE_COUNT: usize = 48;

fn distort(v: f32) -> f32 {
    v / (1.0 + v.abs())
}

/// Real-time tone-energy visualizer filter: each of [`TONE_COUNT`] tones is
/// a narrow resonator; per-tone RMS power is tracked with an exponential
/// moving average and summed into a single soft-distorted output sample.
pub struct ToneFilter {
    resonators: Vec<DirectForm2Transposed<f32>>,
    running_power: [f32; TONE_COUNT],
    running_total_power: f32,
    tone_power_lerp: f32,
    total_tone_power_lerp: f32,
    final_history: f32,
}

impl ToneFilter {
    /// Build (but do not yet tune) a tone filter; call [`Self::init`] before
    /// first use.
    pub fn new() -> Self {
        Self {
            resonators: Vec::new(),
            running_power: [0.0; TONE_COUNT],
            running_total_power: 0.0,
            tone_power_lerp: 0.00012,
            total_tone_power_lerp: 0.0001,
            final_history: 0.0,
        }
    }

    /// Place each tone's resonator at `tuning_freq * 2^((i-12)/12)` and
    /// recompute the running-power smoothing time constants for
    /// `sample_rate`.
    pub fn init(&mut self, sample_rate: f32, tuning_freq: f32) {
        self.tone_power_lerp = 1.0 - (0.00503f64.ln() / f64::from(sample_rate)).exp() as f32;
        self.total_tone_power_lerp = 1.0 - (0.01215f64.ln() / f64::from(sample_rate)).exp() as f32;

        self.resonators.clear();
        let fs: Hertz<f32> = sample_rate.hz();
        for i in 0..TONE_COUNT {
            let freq = tuning_freq * 2f32.powf((i as f32 - 12.0) / 12.0);
            let f0 = freq.hz();
            let coeffs = Coefficients::<f32>::from_params(Type::BandPass, fs, f0, Q_BUTTERWORTH_F32)
                .expect("tone frequency out of range for sample rate");
            self.resonators.push(DirectForm2Transposed::<f32>::new(coeffs));
        }
    }

    /// Filter `in_samples` into `out_samples`, one sample at a time.
    pub fn filter(&mut self, out_samples: &mut [f32], in_samples: &[f32]) {
        for (out, &in_sample) in out_samples.iter_mut().zip(in_samples.iter()) {
            self.running_total_power = self.running_total_power * (1.0 - self.total_tone_power_lerp)
                + self.total_tone_power_lerp * in_sample * in_sample;
            let low_threshold = 0.0002 * self.running_total_power;
            let high_threshold = 0.10 * self.running_total_power;
            let low_threshold_divider = 1.0 / (low_threshold.powi(3) * low_threshold).max(1e-11);

            let mut final_sample = 0.0f32;
            for (tone, resonator) in self.resonators.iter_mut().enumerate() {
                let ret = resonator.run(in_sample);

                let mut new_power = ret * ret;
                new_power = new_power.min(new_power * new_power * new_power * low_threshold_divider);
                new_power = new_power.min(high_threshold);

                new_power = (1.0 - self.tone_power_lerp) * self.running_power[tone] + self.tone_power_lerp * new_power;
                self.running_power[tone] = new_power;

                let rms = new_power.sqrt();
                let tone_out = rms * distort(ret * 40.0 / (rms + 0.001));
                final_sample += tone_out;
            }

            // Trivial 1-pole low-pass to dampen the worst high end.
            final_sample = 0.5 * self.final_history + 0.5 * final_sample;
            self.final_history = final_sample;

            *out = distort(2.0 * final_sample);
        }
    }
}

impl Default for ToneFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_in_silence_out() {
        let mut filter = ToneFilter::new();
        filter.init(44_100.0, 440.0);
        let input = vec![0.0f32; 256];
        let mut output = vec![1.0f32; 256];
        filter.filter(&mut output, &input);
        for &s in &output {
            assert!(s.abs() < 1e-3, "expected near-silence, got {s}");
        }
    }

    #[test]
    fn does_not_produce_nan_on_sustained_tone() {
        let mut filter = ToneFilter::new();
        filter.init(44_100.0, 440.0);
        let input: Vec<f32> = (0..2048)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44_100.0).sin())
            .collect();
        let mut output = vec![0.0f32; input.len()];
        filter.filter(&mut output, &input);
        assert!(output.iter().all(|s| s.is_finite()));
    }
}
