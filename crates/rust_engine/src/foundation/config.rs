//! Runtime configuration for the concurrency, audio, PSO cache, lighting,
//! and video subsystems.
//!
//! Follows the builder + `validate()` shape of
//! [`crate::core::config::ApplicationConfig`]: small `with_*` setters over a
//! plain `Default`, serializable with `serde` for TOML/RON config files.

use serde::{Deserialize, Serialize};

use crate::audio::Quality;

/// Worker thread counts for the [`crate::concurrency::ThreadGroup`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThreadGroupConfig {
    /// Foreground (latency-sensitive) worker count.
    pub foreground_threads: usize,
    /// Background (throughput-oriented) worker count.
    pub background_threads: usize,
}

impl ThreadGroupConfig {
    /// Read `GRANITE_NUM_WORKER_THREADS` if set, otherwise fall back to
    /// `std::thread::available_parallelism()`, and split it 2:1 foreground
    /// to background.
    pub fn from_env_or_hardware() -> Self {
        let total = std::env::var("GRANITE_NUM_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4));
        let foreground_threads = (total * 2 / 3).max(1);
        let background_threads = (total - foreground_threads).max(1);
        Self {
            foreground_threads,
            background_threads,
        }
    }
}

impl Default for ThreadGroupConfig {
    fn default() -> Self {
        Self::from_env_or_hardware()
    }
}

/// Mixer backend parameters and resampler overrides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Output channel count (stereo by default).
    pub channels: usize,
    /// Tuning frequency for the tone filter's resonator bank, in Hz.
    pub tone_filter_tuning_hz: f32,
    /// When set, every [`crate::audio::ResampledStream`] uses this quality
    /// tier instead of the mixer's default `Medium`; tests use this to force
    /// `Low` for determinism without a full sinc convolution.
    #[serde(default)]
    pub resampler_quality_override: Option<ResamplerQuality>,
}

/// Serializable mirror of [`crate::audio::Quality`] (which intentionally
/// does not derive `Serialize`/`Deserialize` itself, to keep the DSP module
/// free of a config-layer dependency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResamplerQuality {
    /// See [`crate::audio::Quality::Low`].
    Low,
    /// See [`crate::audio::Quality::Medium`].
    Medium,
    /// See [`crate::audio::Quality::High`].
    High,
}

impl From<ResamplerQuality> for Quality {
    fn from(value: ResamplerQuality) -> Self {
        match value {
            ResamplerQuality::Low => Quality::Low,
            ResamplerQuality::Medium => Quality::Medium,
            ResamplerQuality::High => Quality::High,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 2,
            tone_filter_tuning_hz: 440.0,
            resampler_quality_override: None,
        }
    }
}

/// Filesystem roots and caps for the PSO/Fossilize-style cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsoCacheConfig {
    /// Writable cache directory (`cache://fossilize/` in the engine's
    /// virtual path scheme).
    pub cache_dir: String,
    /// Read-only directory holding a pre-baked archive shipped with the
    /// build (`assets://fossilize/`).
    pub builtin_dir: Option<String>,
}

impl Default for PsoCacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: "cache/fossilize".to_string(),
            builtin_dir: None,
        }
    }
}

/// Caps on the clustered light engine's bindless arrays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum lights visible to bindless shaders in one frame.
    pub max_lights_bindless: u32,
    /// Maximum lights considered by the global (non-bindless) fallback path.
    pub max_lights_global: u32,
    /// Maximum lights contributing to volumetric fog/diffuse.
    pub max_lights_volume: u32,
    /// Maximum simultaneously-tracked fog regions.
    pub max_fog_regions: u32,
    /// `log2` scale applied to the cluster grid's Z axis.
    pub z_slice_log2_scale: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_lights_bindless: 1024,
            max_lights_global: 32,
            max_lights_volume: 64,
            max_fog_regions: 8,
            z_slice_log2_scale: 4.0,
        }
    }
}

/// Ring sizing for the video decode/encode pipelines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Decoded video frame ring depth.
    pub frame_ring_depth: usize,
    /// Decoded audio ring depth in frames, used for A/V sync.
    pub audio_ring_frames: usize,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            frame_ring_depth: 4,
            audio_ring_frames: 8192,
        }
    }
}

/// Top-level configuration for the runtime, analogous to
/// [`crate::core::config::ApplicationConfig`] but scoped to the
/// concurrency/audio/cache/lighting/video subsystems this crate owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraniteConfig {
    /// Thread pool sizing.
    pub threads: ThreadGroupConfig,
    /// Mixer/resampler/tone-filter parameters.
    pub audio: AudioConfig,
    /// PSO cache filesystem roots.
    pub pso_cache: PsoCacheConfig,
    /// Clustered light engine caps.
    pub clusters: ClusterConfig,
    /// Video pipeline ring sizing.
    pub video: VideoConfig,
    /// Path from `GRANITE_TIMELINE_TRACE`, if set.
    #[serde(default)]
    pub timeline_trace_path: Option<String>,
}

impl GraniteConfig {
    /// Build a config from compiled-in defaults plus whatever environment
    /// variables are set (thread count, timeline trace path).
    pub fn from_env() -> Self {
        Self {
            threads: ThreadGroupConfig::from_env_or_hardware(),
            audio: AudioConfig::default(),
            pso_cache: PsoCacheConfig::default(),
            clusters: ClusterConfig::default(),
            video: VideoConfig::default(),
            timeline_trace_path: std::env::var("GRANITE_TIMELINE_TRACE").ok(),
        }
    }

    /// Override the mixer's sample rate/channel count.
    pub fn with_audio(mut self, audio: AudioConfig) -> Self {
        self.audio = audio;
        self
    }

    /// Override the PSO cache directories.
    pub fn with_pso_cache(mut self, pso_cache: PsoCacheConfig) -> Self {
        self.pso_cache = pso_cache;
        self
    }

    /// Sanity-check the configuration; mirrors
    /// `VulkanRendererConfig::validate`'s style of returning a plain
    /// `Result<(), String>` for user-facing config errors.
    pub fn validate(&self) -> Result<(), String> {
        if self.threads.foreground_threads == 0 {
            return Err("at least one foreground worker thread is required".to_string());
        }
        if self.audio.sample_rate <= 0.0 {
            return Err("audio sample rate must be positive".to_string());
        }
        if self.audio.channels == 0 || self.audio.channels > crate::audio::MAX_AUDIO_CHANNELS {
            return Err(format!(
                "audio channel count must be in 1..={}",
                crate::audio::MAX_AUDIO_CHANNELS
            ));
        }
        if self.pso_cache.cache_dir.is_empty() {
            return Err("pso_cache.cache_dir must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for GraniteConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(GraniteConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_channels_rejected() {
        let mut config = GraniteConfig::default();
        config.audio.channels = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn resampler_quality_override_maps_through() {
        assert_eq!(Quality::from(ResamplerQuality::Low), Quality::Low);
    }
}
