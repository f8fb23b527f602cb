//! Renderer Suite: per-renderable-type shader suites, option-bit-to-define
//! translation, and the fixed global descriptor set 0 bindings.
//!
//! A [`Renderer`] owns one [`ShaderSuite`] per [`RenderableType`] and
//! translates its [`RendererOptions`] bitflags plus detected subgroup
//! capabilities into the `#define`s the shader compiler is invoked with.

use bitflags::bitflags;

/// Opaque-vs-transparent draw-order bucket a [`QueueSubset`] maps onto,
/// mirroring how a frame's render queue is partitioned for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Rendered front-to-back for early depth rejection.
    Opaque,
    /// Rendered back-to-front for correct alpha blending.
    Transparent,
}

/// The seven renderable categories, one [`ShaderSuite`] each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderableType {
    /// Opaque mesh geometry.
    Mesh,
    /// Opaque geometry that also emits light (e.g. emissive decals).
    MeshEmissive,
    /// Skinned/animated mesh geometry.
    Skinned,
    /// Alpha-blended transparent geometry.
    Transparent,
    /// Terrain/heightmap geometry.
    Terrain,
    /// Decal projection geometry.
    Decal,
    /// Debug/wireframe/gizmo geometry.
    Debug,
}

/// All renderable types, in a fixed order matching [`Renderer`]'s internal
/// suite array.
pub const RENDERABLE_TYPES: [RenderableType; 7] = [
    RenderableType::Mesh,
    RenderableType::MeshEmissive,
    RenderableType::Skinned,
    RenderableType::Transparent,
    RenderableType::Terrain,
    RenderableType::Decal,
    RenderableType::Debug,
];

/// The renderer's overall mode, always injected as a `RENDERER_*` define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererType {
    /// Single-pass forward shading.
    Forward,
    /// Deferred G-buffer + lighting resolve.
    Deferred,
    /// Depth-only prepass.
    Depth,
    /// Motion-vector-only pass.
    MotionVector,
}

impl RendererType {
    /// The `#define` name injected for this renderer type.
    pub fn define(self) -> &'static str {
        match self {
            RendererType::Forward => "RENDERER_FORWARD",
            RendererType::Deferred => "RENDERER_DEFERRED",
            RendererType::Depth => "RENDERER_DEPTH",
            RendererType::MotionVector => "RENDERER_MOTION_VECTOR",
        }
    }
}

bitflags! {
    /// Feature toggles translated into shader compiler defines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RendererOptions: u32 {
        /// Shadow mapping enabled for directional light.
        const SHADOW_ENABLE = 1 << 0;
        /// Directional shadow uses cascades.
        const SHADOW_CASCADE_ENABLE = 1 << 1;
        /// Volumetric fog contributes to this pass.
        const VOLUMETRIC_FOG_ENABLE = 1 << 2;
        /// Volumetric diffuse GI contributes to this pass.
        const VOLUMETRIC_DIFFUSE_ENABLE = 1 << 3;
        /// Height/exponential fog enabled.
        const FOG_ENABLE = 1 << 4;
        /// Screen-space refraction enabled.
        const REFRACTION_ENABLE = 1 << 5;
        /// Positional (point/spot) lights contribute.
        const POSITIONAL_LIGHT_ENABLE = 1 << 6;
        /// Positional lights cast shadows.
        const POSITIONAL_LIGHT_SHADOW_ENABLE = 1 << 7;
        /// Positional light data comes from the bindless cluster buffers.
        const POSITIONAL_LIGHT_CLUSTER_BINDLESS = 1 << 8;
        /// Decal projection enabled.
        const POSITIONAL_DECALS = 1 << 9;
        /// Directional shadow uses variance shadow maps.
        const SHADOW_VSM = 1 << 10;
        /// Positional light shadows use variance shadow maps.
        const POSITIONAL_LIGHT_SHADOW_VSM = 1 << 11;
        /// Wide PCF kernel for shadow filtering.
        const SHADOW_PCF_KERNEL_WIDE = 1 << 12;
        /// Alpha test disabled (fully opaque fast path).
        const ALPHA_TEST_DISABLE = 1 << 13;
        /// Multiview (stereo) rendering.
        const MULTIVIEW = 1 << 14;
        /// Ambient occlusion sampled.
        const AMBIENT_OCCLUSION = 1 << 15;
    }
}

impl RendererOptions {
    const DEFINE_TABLE: &'static [(RendererOptions, &'static str)] = &[
        (RendererOptions::SHADOW_ENABLE, "SHADOW_ENABLE"),
        (RendererOptions::SHADOW_CASCADE_ENABLE, "SHADOW_CASCADE_ENABLE"),
        (RendererOptions::VOLUMETRIC_FOG_ENABLE, "VOLUMETRIC_FOG_ENABLE"),
        (RendererOptions::VOLUMETRIC_DIFFUSE_ENABLE, "VOLUMETRIC_DIFFUSE_ENABLE"),
        (RendererOptions::FOG_ENABLE, "FOG_ENABLE"),
        (RendererOptions::REFRACTION_ENABLE, "REFRACTION_ENABLE"),
        (RendererOptions::POSITIONAL_LIGHT_ENABLE, "POSITIONAL_LIGHT_ENABLE"),
        (RendererOptions::POSITIONAL_LIGHT_SHADOW_ENABLE, "POSITIONAL_LIGHT_SHADOW_ENABLE"),
        (RendererOptions::POSITIONAL_LIGHT_CLUSTER_BINDLESS, "POSITIONAL_LIGHT_CLUSTER_BINDLESS"),
        (RendererOptions::POSITIONAL_DECALS, "POSITIONAL_DECALS"),
        (RendererOptions::SHADOW_VSM, "SHADOW_VSM"),
        (RendererOptions::POSITIONAL_LIGHT_SHADOW_VSM, "POSITIONAL_LIGHT_SHADOW_VSM"),
        (RendererOptions::SHADOW_PCF_KERNEL_WIDE, "SHADOW_PCF_KERNEL_WIDE"),
        (RendererOptions::ALPHA_TEST_DISABLE, "ALPHA_TEST_DISABLE"),
        (RendererOptions::MULTIVIEW, "MULTIVIEW"),
        (RendererOptions::AMBIENT_OCCLUSION, "AMBIENT_OCCLUSION"),
    ];

    /// Translate the set bits into shader compiler `#define` names, in a
    /// fixed stable order.
    pub fn defines(self) -> Vec<&'static str> {
        Self::DEFINE_TABLE
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect()
    }
}

bitflags! {
    /// Subgroup (wave/warp) operations the device reports support for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SubgroupCapabilities: u32 {
        /// Basic subgroup operations (ballot, broadcast).
        const BASIC = 1 << 0;
        /// Subgroup shuffle operations.
        const SHUFFLE = 1 << 1;
        /// Subgroup operations supported in fragment shaders.
        const FRAGMENT = 1 << 2;
        /// Subgroup operations supported in compute shaders.
        const COMPUTE = 1 << 3;
    }
}

impl SubgroupCapabilities {
    /// Translate supported subgroup features into their defines.
    pub fn defines(self) -> Vec<&'static str> {
        let mut defines = Vec::new();
        if self.contains(Self::BASIC) {
            defines.push("SUBGROUP_OPS");
        }
        if self.contains(Self::SHUFFLE) {
            defines.push("SUBGROUP_SHUFFLE");
        }
        if self.contains(Self::FRAGMENT) {
            defines.push("SUBGROUP_FRAGMENT");
        }
        if self.contains(Self::COMPUTE) {
            defines.push("SUBGROUP_COMPUTE");
        }
        defines
    }
}

/// Compiles and caches a renderable type's variant pipelines, keyed by the
/// define set they were built with. Actual SPIR-V compilation is a Vulkan
/// backend concern; this tracks which variants have been requested.
#[derive(Debug, Default)]
pub struct ShaderSuite {
    compiled_variants: Vec<Vec<String>>,
}

impl ShaderSuite {
    /// Empty suite, no variants compiled yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or look up) the variant built from `defines`, returning its
    /// stable variant index.
    pub fn resolve_variant(&mut self, defines: &[&str]) -> usize {
        let sorted: Vec<String> = {
            let mut d: Vec<String> = defines.iter().map(|s| s.to_string()).collect();
            d.sort();
            d
        };
        if let Some(index) = self.compiled_variants.iter().position(|v| v == &sorted) {
            return index;
        }
        self.compiled_variants.push(sorted);
        self.compiled_variants.len() - 1
    }

    /// How many distinct define-set variants have been compiled.
    pub fn variant_count(&self) -> usize {
        self.compiled_variants.len()
    }
}

/// Fixed global descriptor set 0 bindings, shared across every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum GlobalBinding {
    /// Camera/view/projection transform UBO.
    Transform = 0,
    /// Frame-wide render-parameters UBO (time, exposure, viewport).
    RenderParameters = 1,
    /// Volumetric diffuse UBO.
    VolumetricDiffuse = 2,
    /// Volumetric fog UBO.
    VolumetricFog = 3,
    /// Precomputed BRDF integration LUT.
    BrdfLut = 4,
    /// Directional light shadow map/atlas.
    DirectionalShadow = 5,
    /// Ambient occlusion texture.
    AmbientOcclusion = 6,
    /// Clusterer parameters UBO.
    ClustererParameters = 7,
    /// Cluster transform buffer.
    ClusterTransform = 8,
    /// Cluster per-voxel bitmask buffer.
    ClusterBitmask = 9,
    /// Cluster per-voxel light-index range buffer.
    ClusterRange = 10,
    /// Decal cluster transform buffer.
    DecalClusterTransform = 11,
    /// Decal cluster bitmask buffer.
    DecalClusterBitmask = 12,
    /// Decal cluster range buffer.
    DecalClusterRange = 13,
    /// Stock nearest-clamp sampler.
    SamplerNearestClamp = 14,
    /// Stock linear-clamp sampler.
    SamplerLinearClamp = 15,
    /// Stock linear-wrap sampler.
    SamplerLinearWrap = 16,
    /// Fallback volumetric diffuse texel buffer, bound when no probe volume
    /// covers a surface.
    FallbackVolumetricDiffuse = 17,
}

/// Pipeline fixed-function state [`Renderer::flush`] configures before
/// dispatching a queue subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    /// Winding order considered front-facing.
    pub front_face_clockwise: bool,
    /// Per-channel color write mask (RGBA).
    pub color_write_mask: [bool; 4],
    /// Depth test enabled.
    pub depth_test: bool,
    /// Depth writes enabled.
    pub depth_write: bool,
    /// Constant depth bias.
    pub depth_bias: f32,
    /// Backface culling mode.
    pub cull_mode: CullMode,
    /// Stencil test enabled.
    pub stencil_test: bool,
    /// Stencil writes enabled.
    pub stencil_write: bool,
    /// Stencil reference value.
    pub stencil_ref: u8,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            front_face_clockwise: false,
            color_write_mask: [true; 4],
            depth_test: true,
            depth_write: true,
            depth_bias: 0.0,
            cull_mode: CullMode::Back,
            stencil_test: false,
            stencil_write: false,
            stencil_ref: 0,
        }
    }
}

/// Triangle culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling.
    None,
    /// Cull front-facing triangles.
    Front,
    /// Cull back-facing triangles.
    Back,
}

/// Which [`CommandType`] subsets a [`Renderer::flush`] call dispatches, and
/// in what order. Different renderer types draw different subsets: a depth
/// prepass skips transparents, a motion-vector pass only wants the opaque
/// subset tagged as dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSubset {
    /// Fully opaque geometry.
    Opaque,
    /// Opaque geometry that also emits light.
    OpaqueEmissive,
    /// Light-contributing geometry (decals, volumetrics).
    Light,
    /// Alpha-blended geometry.
    Transparent,
}

impl QueueSubset {
    fn command_type(self) -> CommandType {
        match self {
            QueueSubset::Opaque | QueueSubset::OpaqueEmissive | QueueSubset::Light => CommandType::Opaque,
            QueueSubset::Transparent => CommandType::Transparent,
        }
    }
}

/// Bundle of seven [`ShaderSuite`]s (one per [`RenderableType`]), the
/// renderer's type, its enabled [`RendererOptions`], and detected subgroup
/// capabilities.
pub struct Renderer {
    renderer_type: RendererType,
    options: RendererOptions,
    subgroups: SubgroupCapabilities,
    suites: [ShaderSuite; 7],
}

impl Renderer {
    /// Build a renderer of `renderer_type` with `options` and the device's
    /// detected `subgroups`.
    pub fn new(renderer_type: RendererType, options: RendererOptions, subgroups: SubgroupCapabilities) -> Self {
        Self {
            renderer_type,
            options,
            subgroups,
            suites: Default::default(),
        }
    }

    fn suite_index(renderable: RenderableType) -> usize {
        RENDERABLE_TYPES.iter().position(|t| *t == renderable).expect("exhaustive RenderableType table")
    }

    /// The full define set this renderer compiles shaders with: the
    /// renderer-type define, every enabled option's define, and every
    /// supported subgroup feature's define.
    pub fn shader_defines(&self) -> Vec<&'static str> {
        let mut defines = vec![self.renderer_type.define()];
        defines.extend(self.options.defines());
        defines.extend(self.subgroups.defines());
        defines
    }

    /// Resolve (compiling if new) the shader variant for `renderable` under
    /// this renderer's current define set.
    pub fn resolve_shader_variant(&mut self, renderable: RenderableType) -> usize {
        let defines = self.shader_defines();
        self.suites[Self::suite_index(renderable)].resolve_variant(&defines)
    }

    /// Number of compiled variants for `renderable`, for diagnostics/tests.
    pub fn variant_count(&self, renderable: RenderableType) -> usize {
        self.suites[Self::suite_index(renderable)].variant_count()
    }

    /// Compute the fixed-function pipeline state this renderer's options
    /// imply: wide PCF widens no fixed-function state (it's a shader
    /// concern), but VSM shadow passes disable depth bias in favor of the
    /// linear-depth write the VSM resolve expects, and alpha-test-disabled
    /// passes skip stencil entirely.
    pub fn pipeline_state(&self, subset: QueueSubset) -> PipelineState {
        let mut state = PipelineState::default();
        if subset == QueueSubset::Transparent {
            state.depth_write = false;
            state.cull_mode = CullMode::None;
        }
        if self.options.contains(RendererOptions::SHADOW_VSM) {
            state.depth_bias = 0.0;
        } else if self.options.contains(RendererOptions::SHADOW_ENABLE) {
            state.depth_bias = 1.25;
        }
        state
    }

    /// Order of queue subsets this renderer type dispatches in `flush`.
    pub fn dispatch_order(&self) -> &'static [QueueSubset] {
        match self.renderer_type {
            RendererType::Forward => &[
                QueueSubset::Opaque,
                QueueSubset::OpaqueEmissive,
                QueueSubset::Light,
                QueueSubset::Transparent,
            ],
            RendererType::Deferred => &[QueueSubset::Opaque, QueueSubset::OpaqueEmissive],
            RendererType::Depth | RendererType::MotionVector => &[QueueSubset::Opaque],
        }
    }

    /// Resolve pipeline state per subset in [`Self::dispatch_order`] and
    /// return the `(subset, state, CommandType)` triples a backend's
    /// `queue.dispatch_subset` call needs, in dispatch order.
    pub fn flush_plan(&self) -> Vec<(QueueSubset, PipelineState, CommandType)> {
        self.dispatch_order()
            .iter()
            .map(|&subset| (subset, self.pipeline_state(subset), subset.command_type()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_translate_to_stable_define_order() {
        let options = RendererOptions::AMBIENT_OCCLUSION | RendererOptions::SHADOW_ENABLE;
        assert_eq!(options.defines(), vec!["SHADOW_ENABLE", "AMBIENT_OCCLUSION"]);
    }

    #[test]
    fn renderer_type_define_is_always_present() {
        let renderer = Renderer::new(RendererType::Deferred, RendererOptions::empty(), SubgroupCapabilities::empty());
        assert_eq!(renderer.shader_defines(), vec!["RENDERER_DEFERRED"]);
    }

    #[test]
    fn subgroup_capabilities_append_their_defines() {
        let renderer = Renderer::new(
            RendererType::Forward,
            RendererOptions::empty(),
            SubgroupCapabilities::BASIC | SubgroupCapabilities::COMPUTE,
        );
        let defines = renderer.shader_defines();
        assert!(defines.contains(&"SUBGROUP_OPS"));
        assert!(defines.contains(&"SUBGROUP_COMPUTE"));
        assert!(!defines.contains(&"SUBGROUP_SHUFFLE"));
    }

    #[test]
    fn shader_suite_dedups_identical_define_sets() {
        let mut renderer = Renderer::new(RendererType::Forward, RendererOptions::SHADOW_ENABLE, SubgroupCapabilities::empty());
        let first = renderer.resolve_shader_variant(RenderableType::Mesh);
        let second = renderer.resolve_shader_variant(RenderableType::Mesh);
        assert_eq!(first, second);
        assert_eq!(renderer.variant_count(RenderableType::Mesh), 1);
    }

    #[test]
    fn different_options_produce_a_new_variant() {
        let mut renderer = Renderer::new(RendererType::Forward, RendererOptions::empty(), SubgroupCapabilities::empty());
        renderer.resolve_shader_variant(RenderableType::Mesh);

        let mut with_shadows = Renderer::new(RendererType::Forward, RendererOptions::SHADOW_ENABLE, SubgroupCapabilities::empty());
        let other_variant = with_shadows.resolve_shader_variant(RenderableType::Mesh);
        assert_eq!(other_variant, 0);
        assert_eq!(with_shadows.variant_count(RenderableType::Mesh), 1);
    }

    #[test]
    fn depth_renderer_skips_transparent_subset() {
        let renderer = Renderer::new(RendererType::Depth, RendererOptions::empty(), SubgroupCapabilities::empty());
        assert_eq!(renderer.dispatch_order(), &[QueueSubset::Opaque]);
    }

    #[test]
    fn transparent_subset_disables_depth_write_and_culling() {
        let renderer = Renderer::new(RendererType::Forward, RendererOptions::empty(), SubgroupCapabilities::empty());
        let state = renderer.pipeline_state(QueueSubset::Transparent);
        assert!(!state.depth_write);
        assert_eq!(state.cull_mode, CullMode::None);
    }

    #[test]
    fn flush_plan_matches_dispatch_order_length() {
        let renderer = Renderer::new(RendererType::Forward, RendererOptions::empty(), SubgroupCapabilities::empty());
        assert_eq!(renderer.flush_plan().len(), renderer.dispatch_order().len());
    }
}
