//! Realtime video: color-space math, the decode ring and A/V clock, encoder
//! PTS policy, and (behind the `video` feature) the `ffmpeg-next` backend
//! that actually demuxes, decodes, and encodes.

pub mod color_convert;
pub mod decode;
pub mod encode;

#[cfg(feature = "video")]
pub mod ffmpeg_backend;

pub use color_convert::{
    range_scale_bias, rgb_to_yuv_matrix, yuv_to_rgb_matrix, ChromaSiting, ColorSpace, RangeMode, RangeScaleBias,
};
pub use decode::{audio_delta_rate_factor, AcquireResult, DecodeRing, SlotState, SmoothedClock, VideoDecodeError};
pub use encode::{clamp_audio_pts, PtsDecision, RealtimePtsTracker};

#[cfg(feature = "video")]
pub use ffmpeg_backend::{FfmpegBackendError, FileVideoDecoder, RealtimeVideoEncoder};
