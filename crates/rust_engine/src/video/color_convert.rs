//! Pure math for the YUV↔RGB color-conversion compute shaders' uniform
//! buffers. No GPU calls live here — this module computes the matrices and
//! constants a compute dispatch is parameterized with; the dispatch itself
//! is the renderer's job.

use crate::foundation::math::Mat4;

/// Color primaries/transfer matrix selection, mirroring `AVCOL_SPC_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// `AVCOL_SPC_BT709`.
    Bt709,
    /// `AVCOL_SPC_BT470BG` / `AVCOL_SPC_SMPTE170M` (BT.601, 525-line).
    Bt601_525,
    /// `AVCOL_SPC_SMPTE170M` variant for 625-line sources.
    Bt601_625,
    /// `AVCOL_SPC_BT2020_NCL` / `_CL`.
    Bt2020,
    /// `AVCOL_SPC_SMPTE240M`.
    Smpte240M,
}

impl ColorSpace {
    /// Coefficients `(kr, kb)` for the luma/chroma matrix `Y' = kr*R + (1-kr-kb)*G + kb*B`.
    fn kr_kb(self) -> (f32, f32) {
        match self {
            ColorSpace::Bt709 => (0.2126, 0.0722),
            ColorSpace::Bt601_525 | ColorSpace::Bt601_625 => (0.299, 0.114),
            ColorSpace::Bt2020 => (0.2627, 0.0593),
            ColorSpace::Smpte240M => (0.212, 0.087),
        }
    }

    /// Fall back to BT.709 for anything `AVCOL_SPC_*` does not map cleanly.
    pub fn from_av_unspecified() -> Self {
        ColorSpace::Bt709
    }
}

/// Whether a stream uses full-range (`0..255`) or limited/studio-range
/// (`16..235` luma, `16..240` chroma) samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// `0..=255` for 8-bit (scaled for higher bit depths).
    Full,
    /// `16..235`/`16..240` studio range.
    Limited,
}

/// Decoder-side scale/bias applied before the color matrix, and the
/// bit-depth rescale needed because 10/12-bit samples are stored in the
/// high bits of a 16-bit container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeScaleBias {
    /// Luma scale factor.
    pub luma_scale: f32,
    /// Luma offset (pre-scale).
    pub luma_offset: f32,
    /// Chroma scale factor.
    pub chroma_scale: f32,
    /// Compensates N-bit samples packed into the high bits of a wider
    /// container (e.g. 10-bit into 16-bit storage): `1 << (16 - bit_depth)`.
    pub unorm_rescale: f32,
}

/// Compute luma/chroma range scale+bias for `range` at `bit_depth` bits.
pub fn range_scale_bias(range: RangeMode, bit_depth: u32) -> RangeScaleBias {
    let shift = bit_depth.saturating_sub(8);
    let (luma_span, chroma_span, luma_offset_8bit) = match range {
        RangeMode::Full => (255.0, 255.0, 0.0),
        RangeMode::Limited => (219.0, 224.0, 16.0),
    };
    let max_value = f32::from(((1u32 << bit_depth) - 1) as u16);
    RangeScaleBias {
        luma_scale: max_value / luma_span,
        luma_offset: luma_offset_8bit * f32::from(1u16 << shift),
        chroma_scale: max_value / chroma_span,
        unorm_rescale: f32::from(1u16 << (16 - bit_depth.min(16))),
    }
}

/// Build the `yuv_to_rgb` matrix: range expansion folded with the
/// color-space's YCbCr→RGB transform.
pub fn yuv_to_rgb_matrix(space: ColorSpace, range: RangeScaleBias) -> Mat4 {
    let (kr, kb) = space.kr_kb();
    let kg = 1.0 - kr - kb;

    // YCbCr -> RGB, before range expansion.
    let r_cr = 2.0 * (1.0 - kr);
    let b_cb = 2.0 * (1.0 - kb);
    let g_cb = -b_cb * kb / kg;
    let g_cr = -r_cr * kr / kg;

    #[rustfmt::skip]
    let matrix = Mat4::new(
        range.luma_scale, 0.0,                      r_cr * range.chroma_scale, -r_cr * 0.5 * range.chroma_scale - range.luma_offset * range.luma_scale / 255.0,
        range.luma_scale, g_cb * range.chroma_scale, g_cr * range.chroma_scale, -(g_cb + g_cr) * 0.5 * range.chroma_scale - range.luma_offset * range.luma_scale / 255.0,
        range.luma_scale, b_cb * range.chroma_scale, 0.0,                      -b_cb * 0.5 * range.chroma_scale - range.luma_offset * range.luma_scale / 255.0,
        0.0,              0.0,                       0.0,                      1.0,
    );
    matrix
}

/// Build the forward RGB→YCbCr matrix used by the encoder's color
/// conversion pass: full-scale `Y'` plus 0.5-centered `Cb'`/`Cr'`.
pub fn rgb_to_yuv_matrix(space: ColorSpace) -> Mat4 {
    let (kr, kb) = space.kr_kb();
    let kg = 1.0 - kr - kb;

    #[rustfmt::skip]
    let matrix = Mat4::new(
        kr, kg, kb, 0.0,
        -0.5 * kr / (1.0 - kb), -0.5 * kg / (1.0 - kb), 0.5, 0.5,
        0.5, -0.5 * kg / (1.0 - kr), -0.5 * kb / (1.0 - kr), 0.5,
        0.0, 0.0, 0.0, 1.0,
    );
    matrix
}

/// Chroma subsample siting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaSiting {
    /// Top-left sample.
    TopLeft,
    /// Top-center sample.
    Top,
    /// Left-center sample.
    Left,
    /// Center sample (MPEG-1 default).
    Center,
    /// Bottom-center sample.
    Bottom,
    /// Bottom-left sample.
    BottomLeft,
}

impl ChromaSiting {
    /// The `(u, v)` offset the shader samples the chroma plane at.
    pub fn uv_offset(self) -> (f32, f32) {
        match self {
            ChromaSiting::TopLeft => (1.0, 1.0),
            ChromaSiting::Top => (0.5, 1.0),
            ChromaSiting::Left => (1.0, 0.5),
            ChromaSiting::Center => (0.5, 0.5),
            ChromaSiting::Bottom => (0.5, 0.0),
            ChromaSiting::BottomLeft => (1.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_has_no_luma_offset() {
        let range = range_scale_bias(RangeMode::Full, 8);
        assert_eq!(range.luma_offset, 0.0);
        assert!((range.luma_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn limited_range_10bit_scales_offset_by_bit_depth() {
        let range = range_scale_bias(RangeMode::Limited, 10);
        assert!((range.luma_offset - 64.0).abs() < 1e-6);
    }

    #[test]
    fn chroma_siting_offsets_match_known_values() {
        assert_eq!(ChromaSiting::Center.uv_offset(), (0.5, 0.5));
        assert_eq!(ChromaSiting::TopLeft.uv_offset(), (1.0, 1.0));
        assert_eq!(ChromaSiting::BottomLeft.uv_offset(), (1.0, 0.0));
    }

    #[test]
    fn yuv_to_rgb_matrix_is_finite() {
        let range = range_scale_bias(RangeMode::Limited, 8);
        let matrix = yuv_to_rgb_matrix(ColorSpace::Bt709, range);
        assert!(matrix.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rgb_to_yuv_round_trips_gray() {
        let matrix = rgb_to_yuv_matrix(ColorSpace::Bt709);
        let gray = crate::foundation::math::Vec4::new(0.5, 0.5, 0.5, 1.0);
        let ycbcr = matrix * gray;
        assert!((ycbcr.x - 0.5).abs() < 1e-5);
        assert!((ycbcr.y - 0.5).abs() < 1e-5);
        assert!((ycbcr.z - 0.5).abs() < 1e-5);
    }
}
