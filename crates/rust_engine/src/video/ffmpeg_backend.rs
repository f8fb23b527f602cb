//! `ffmpeg-next` bindings for the decode/encode backends, gated behind the
//! `video` feature. This is the only part of the video pipeline that
//! touches libav directly — everything else in [`super`] is backend-agnostic
//! ring/PTS bookkeeping.

use std::path::Path;

use ffmpeg_next as ffmpeg;
use thiserror::Error;

/// Failures opening or driving an `ffmpeg-next` demuxer/decoder.
#[derive(Debug, Error)]
pub enum FfmpegBackendError {
    /// `ffmpeg::init()` or opening the input failed.
    #[error("ffmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg::Error),
    /// The opened input has no video stream.
    #[error("input has no video stream")]
    NoVideoStream,
}

/// Demuxes and decodes one video stream from a file, handing decoded
/// frames to [`super::decode::DecodeRing`] via [`Self::receive_frame`].
pub struct FileVideoDecoder {
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::decoder::Video,
    video_stream_index: usize,
    time_base: ffmpeg::Rational,
}

impl FileVideoDecoder {
    /// Open `path` and locate its best video stream.
    pub fn open(path: &Path) -> Result<Self, FfmpegBackendError> {
        ffmpeg::init()?;
        let input = ffmpeg::format::input(&path)?;
        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or(FfmpegBackendError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();
        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video()?;

        Ok(Self {
            input,
            decoder,
            video_stream_index,
            time_base,
        })
    }

    /// Pump one packet through the decoder, invoking `on_frame` for every
    /// decoded frame it produces along with its PTS in seconds.
    pub fn pump(&mut self, mut on_frame: impl FnMut(&ffmpeg::frame::Video, f64)) -> Result<bool, FfmpegBackendError> {
        let Some((stream, packet)) = self.input.packets().next() else {
            return Ok(false);
        };
        if stream.index() != self.video_stream_index {
            return Ok(true);
        }

        self.decoder.send_packet(&packet)?;
        let mut frame = ffmpeg::frame::Video::empty();
        while self.decoder.receive_frame(&mut frame).is_ok() {
            let pts_seconds = frame
                .timestamp()
                .map(|pts| pts as f64 * f64::from(self.time_base.numerator()) / f64::from(self.time_base.denominator()))
                .unwrap_or(0.0);
            on_frame(&frame, pts_seconds);
        }
        Ok(true)
    }
}

/// H.264 realtime encoder wrapping an `ffmpeg-next` video encoder context,
/// used by the GPU-readback encode backend.
pub struct RealtimeVideoEncoder {
    encoder: ffmpeg::encoder::Video,
}

impl RealtimeVideoEncoder {
    /// Open a libx264 encoder at `width`x`height`, `frame_rate` fps.
    pub fn new(width: u32, height: u32, frame_rate_num: i32, frame_rate_den: i32) -> Result<Self, FfmpegBackendError> {
        ffmpeg::init()?;
        let codec = ffmpeg::encoder::find(ffmpeg::codec::Id::H264).ok_or(FfmpegBackendError::NoVideoStream)?;
        let context = ffmpeg::codec::context::Context::new_with_codec(codec);
        let mut encoder = context.encoder().video()?;
        encoder.set_width(width);
        encoder.set_height(height);
        encoder.set_format(ffmpeg::format::Pixel::YUV420P);
        encoder.set_time_base(ffmpeg::Rational::new(frame_rate_den, frame_rate_num));
        let encoder = encoder.open_as(codec)?;
        Ok(Self { encoder })
    }

    /// Send one planar YUV420P frame for encoding; returns encoded packets
    /// as raw byte buffers with their keyframe flag.
    pub fn encode_frame(&mut self, frame: &ffmpeg::frame::Video) -> Result<Vec<(Vec<u8>, bool)>, FfmpegBackendError> {
        self.encoder.send_frame(frame)?;
        let mut packets = Vec::new();
        let mut packet = ffmpeg::Packet::empty();
        while self.encoder.receive_packet(&mut packet).is_ok() {
            let is_key = packet.is_key();
            if let Some(data) = packet.data() {
                packets.push((data.to_vec(), is_key));
            }
        }
        Ok(packets)
    }
}
