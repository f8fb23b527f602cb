//! Volumetric diffuse (probe-grid global illumination) and volumetric fog.
//!
//! The actual cubemap rendering and froxel compute passes are GPU work; this
//! module owns the CPU-side bookkeeping that schedules them: which probe
//! layer updates this frame, jitter offsets, probe frustum culling, and the
//! fog dither LUT's temporal offset sequence.

use crate::foundation::math::Vec3;

/// Per-face cubemap resolution stored for relighting.
pub const PROBE_RESOLUTION: u32 = 8;
/// G-buffer capture resolution is `PROBE_RESOLUTION * PROBE_DOWNSAMPLING_FACTOR`
/// per face before compute downsamples it back down.
pub const PROBE_DOWNSAMPLING_FACTOR: u32 = 16;
/// Temporally-interleaved jittered copies of each probe.
pub const NUM_PROBE_LAYERS: u32 = 4;

/// The four jitter offsets probes cycle through across frames, avoiding
/// correlated sampling between neighboring probes updated the same frame.
pub fn jitter_offsets() -> [Vec3; NUM_PROBE_LAYERS as usize] {
    [
        Vec3::new(0.25, 0.25, 0.25),
        Vec3::new(-0.25, 0.25, -0.25),
        Vec3::new(0.25, -0.25, -0.25),
        Vec3::new(-0.25, -0.25, 0.25),
    ]
}

/// Which of [`NUM_PROBE_LAYERS`] updates this frame at voxel `(x, y)`:
/// `(layer + (y&1)*2 + (x&1)) % 4`.
pub fn layer_for_voxel(frame_layer: u32, x: u32, y: u32) -> u32 {
    (frame_layer + (y & 1) * 2 + (x & 1)) % NUM_PROBE_LAYERS
}

/// A single diffuse-GI probe volume.
#[derive(Debug, Clone, Copy)]
pub struct ProbeVolume {
    /// World-space center.
    pub center: Vec3,
    /// Half-extents of the probe grid's bounding box.
    pub half_extent: Vec3,
    /// Grid resolution along each axis.
    pub grid_size: [u32; 3],
}

impl ProbeVolume {
    fn contains_point(&self, point: Vec3) -> bool {
        let local = point - self.center;
        local.x.abs() <= self.half_extent.x && local.y.abs() <= self.half_extent.y && local.z.abs() <= self.half_extent.z
    }
}

/// Enumerate every probe volume whose bounds intersect the camera frustum
/// test, appending indices into a worklist the relighting compute pass
/// dispatches indirectly from.
pub fn cull_probe_volumes(volumes: &[ProbeVolume], camera_position: Vec3, frustum_radius: f32) -> Vec<usize> {
    volumes
        .iter()
        .enumerate()
        .filter(|(_, v)| v.contains_point(camera_position) || (v.center - camera_position).norm() <= frustum_radius)
        .map(|(i, _)| i)
        .collect()
}

/// Tracks which probe layer is due for an update and advances it once per
/// frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeLayerScheduler {
    next_layer: u32,
}

impl ProbeLayerScheduler {
    /// Fresh scheduler starting at layer 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame, returning the layer updated this frame.
    pub fn advance(&mut self) -> u32 {
        let layer = self.next_layer;
        self.next_layer = (self.next_layer + 1) % NUM_PROBE_LAYERS;
        layer
    }
}

/// Froxel fog volume dimensions; defaults to 160×92×64.
#[derive(Debug, Clone, Copy)]
pub struct FogVolumeDimensions {
    /// Froxel count along X.
    pub width: u32,
    /// Froxel count along Y.
    pub height: u32,
    /// Froxel count along Z (view depth).
    pub depth: u32,
}

impl Default for FogVolumeDimensions {
    fn default() -> Self {
        Self {
            width: 160,
            height: 92,
            depth: 64,
        }
    }
}

/// 128×128×64 blue-noise + golden-ratio temporal offset LUT used to
/// decorrelate fog sample jitter across frames. Only the temporal-offset
/// sequence is modeled here; the blue-noise texture itself is opaque asset
/// data supplied by the renderer.
pub struct FogDitherSequence {
    frame_index: u64,
}

/// The fractional part of the golden ratio, used for low-discrepancy
/// temporal sequences.
const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

impl FogDitherSequence {
    /// Start the sequence at frame 0.
    pub fn new() -> Self {
        Self { frame_index: 0 }
    }

    /// Advance to the next frame and return its dither offset in `[0, 1)`.
    pub fn next_offset(&mut self) -> f32 {
        let offset = (self.frame_index as f32 * GOLDEN_RATIO_CONJUGATE).fract();
        self.frame_index += 1;
        offset
    }
}

impl Default for FogDitherSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporal reprojection state for the light-density froxel volume: the
/// previous frame's view-projection, used to resample accumulated density
/// before blending in this frame's contribution.
#[derive(Debug, Clone, Copy)]
pub struct FogReprojectionState {
    /// Previous frame's combined view-projection matrix.
    pub old_projection: crate::foundation::math::Mat4,
    /// `true` once at least one frame has been rendered (first frame has no
    /// valid history to reproject from).
    pub has_history: bool,
}

impl FogReprojectionState {
    /// No history yet; the first frame renders with no reprojection term.
    pub fn fresh() -> Self {
        Self {
            old_projection: crate::foundation::math::Mat4::identity(),
            has_history: false,
        }
    }

    /// Record this frame's projection as history for the next frame.
    pub fn advance(&mut self, projection: crate::foundation::math::Mat4) {
        self.old_projection = projection;
        self.has_history = true;
    }

    /// Register this fog pass's render-graph barriers. Always takes the
    /// explicit-flags, three-argument form: the caller (the frame graph
    /// builder) always has concrete dependency flags in hand by the time
    /// this runs, so there is no useful two-argument default to fall back
    /// to.
    pub fn setup_render_pass_dependencies(&self, graph: &mut dyn RenderGraph, pass: &dyn RenderPass, flags: DependencyFlags) {
        graph.add_pass_dependency(pass.name(), flags);
    }
}

bitflags::bitflags! {
    /// Synchronization scope for a render-graph pass dependency.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DependencyFlags: u32 {
        /// Dependency is scoped to the overlapping framebuffer region only.
        const BY_REGION = 1 << 0;
        /// Dependency applies per-view in a multiview render pass.
        const VIEW_LOCAL = 1 << 1;
    }
}

/// Backend hook for registering a pass's place in the frame's render
/// graph. A Vulkan backend implements this against its real dependency
/// graph; this module only needs to know that a dependency was declared.
pub trait RenderGraph {
    /// Record that `pass` depends on a resource this volume last wrote,
    /// synchronized according to `flags`.
    fn add_pass_dependency(&mut self, pass: &str, flags: DependencyFlags);
}

/// A single render pass within a [`RenderGraph`], identified by name.
pub trait RenderPass {
    /// Stable name used to look this pass up in the graph.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_for_voxel_cycles_with_parity() {
        assert_eq!(layer_for_voxel(0, 0, 0), 0);
        assert_eq!(layer_for_voxel(0, 1, 0), 1);
        assert_eq!(layer_for_voxel(0, 0, 1), 2);
        assert_eq!(layer_for_voxel(0, 1, 1), 3);
        assert_eq!(layer_for_voxel(2, 1, 1), (2 + 3) % 4);
    }

    #[test]
    fn scheduler_cycles_through_all_layers() {
        let mut scheduler = ProbeLayerScheduler::new();
        let layers: Vec<_> = (0..8).map(|_| scheduler.advance()).collect();
        assert_eq!(layers, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn cull_probe_volumes_keeps_only_nearby() {
        let volumes = vec![
            ProbeVolume {
                center: Vec3::new(0.0, 0.0, 0.0),
                half_extent: Vec3::new(1.0, 1.0, 1.0),
                grid_size: [4, 4, 4],
            },
            ProbeVolume {
                center: Vec3::new(1000.0, 0.0, 0.0),
                half_extent: Vec3::new(1.0, 1.0, 1.0),
                grid_size: [4, 4, 4],
            },
        ];
        let visible = cull_probe_volumes(&volumes, Vec3::new(0.0, 0.0, 0.0), 50.0);
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn jitter_offsets_are_distinct() {
        let offsets = jitter_offsets();
        for i in 0..offsets.len() {
            for j in (i + 1)..offsets.len() {
                assert_ne!(offsets[i], offsets[j]);
            }
        }
    }

    #[test]
    fn dither_sequence_is_low_discrepancy_and_bounded() {
        let mut sequence = FogDitherSequence::new();
        let samples: Vec<_> = (0..5).map(|_| sequence.next_offset()).collect();
        assert!(samples.iter().all(|&s| (0.0..1.0).contains(&s)));
        assert_ne!(samples[0], samples[1]);
    }

    struct RecordingGraph {
        recorded: Vec<(String, DependencyFlags)>,
    }

    impl RenderGraph for RecordingGraph {
        fn add_pass_dependency(&mut self, pass: &str, flags: DependencyFlags) {
            self.recorded.push((pass.to_string(), flags));
        }
    }

    struct NamedPass(&'static str);

    impl RenderPass for NamedPass {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn setup_render_pass_dependencies_forwards_explicit_flags() {
        let state = FogReprojectionState::fresh();
        let mut graph = RecordingGraph { recorded: Vec::new() };
        let pass = NamedPass("volumetric-fog");

        state.setup_render_pass_dependencies(&mut graph, &pass, DependencyFlags::BY_REGION | DependencyFlags::VIEW_LOCAL);

        assert_eq!(
            graph.recorded,
            vec![("volumetric-fog".to_string(), DependencyFlags::BY_REGION | DependencyFlags::VIEW_LOCAL)]
        );
    }
}
