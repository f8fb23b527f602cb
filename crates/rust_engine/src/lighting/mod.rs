//! Bindless clustered lighting: positional-light visibility, the shadow
//! atlas LRU, cluster voxel bitmasks, and volumetric diffuse/fog scheduling.

pub mod clusterer;
pub mod volumetric;

pub use clusterer::{
    build_cluster_bitmask, gather_visible_lights, BindlessLightSlot, ClusterBuffers, ClusterGrid, PositionalLight,
    ShadowAtlasCache, ShadowRenderer, MAX_LIGHTS_BINDLESS, MAX_VISIBILITY_TASKS,
};
pub use volumetric::{
    cull_probe_volumes, jitter_offsets, layer_for_voxel, DependencyFlags, FogDitherSequence, FogReprojectionState,
    FogVolumeDimensions, ProbeLayerScheduler, ProbeVolume, RenderGraph, RenderPass, NUM_PROBE_LAYERS,
    PROBE_DOWNSAMPLING_FACTOR, PROBE_RESOLUTION,
};
