//! Bindless clustered light engine: per-frame visibility gather, shadow
//! atlas LRU caching, and voxel bitmask construction for positional lights.
//!
//! The GPU-facing parts (depth rendering, compute dispatch) are behind the
//! [`ShadowRenderer`] trait so this module's scheduling/caching logic is
//! independently testable; a Vulkan backend supplies the real
//! implementation.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::foundation::math::Vec3;

/// Maximum lights visible to bindless shaders in one frame.
pub const MAX_LIGHTS_BINDLESS: usize = 1024;
/// Shards the per-frame visibility gather runs across.
pub const MAX_VISIBILITY_TASKS: usize = 4;

/// A positional (point or spot) light as seen by the clusterer. Everything
/// needed to key its shadow-map slot and bucket it into cluster voxels.
#[derive(Debug, Clone, Copy)]
pub struct PositionalLight {
    /// World-space position.
    pub position: Vec3,
    /// Bounding sphere radius used for frustum/voxel overlap tests.
    pub radius: f32,
    /// Opaque identity distinguishing otherwise-identical lights (cookie
    /// texture index, light index, …) for transform-hash keying.
    pub cookie: u64,
    /// Monotonic timestamp of the light's last transform change.
    pub last_timestamp: u64,
    /// Whether this light casts a shadow this frame.
    pub shadow_enabled: bool,
    /// 1 face for a spot light, 6 for a point light.
    pub shadow_faces: u8,
}

impl PositionalLight {
    /// `transform_hash` keys the shadow atlas LRU: it changes only when the
    /// light's cookie or last transform-change timestamp changes, so an
    /// unmoved light keeps its cached shadow slot across frames.
    pub fn transform_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cookie.hash(&mut hasher);
        self.last_timestamp.hash(&mut hasher);
        hasher.finish()
    }
}

/// One entry in the bindless light array the clustered shading shaders
/// index into.
#[derive(Debug, Clone, Copy)]
pub struct BindlessLightSlot {
    /// Index into the frame's positional light list.
    pub handle: usize,
    /// See [`PositionalLight::transform_hash`].
    pub transform_hash: u64,
}

/// Gathers visible lights across [`MAX_VISIBILITY_TASKS`] shards (mirroring
/// the thread-group-sharded visibility pass) and merges them into a single
/// bindless slot list, capped at [`MAX_LIGHTS_BINDLESS`].
pub fn gather_visible_lights(
    lights: &[PositionalLight],
    frustum_test: impl Fn(&PositionalLight) -> bool + Sync,
) -> Vec<BindlessLightSlot> {
    let shard_size = lights.len().div_ceil(MAX_VISIBILITY_TASKS).max(1);
    let mut shards: Vec<Vec<BindlessLightSlot>> = lights
        .chunks(shard_size)
        .enumerate()
        .map(|(shard_index, chunk)| {
            chunk
                .iter()
                .enumerate()
                .filter(|(_, light)| frustum_test(light))
                .map(|(i, light)| BindlessLightSlot {
                    handle: shard_index * shard_size + i,
                    transform_hash: light.transform_hash(),
                })
                .collect()
        })
        .collect();

    let mut merged = Vec::new();
    for shard in shards.drain(..) {
        merged.extend(shard);
    }
    merged.truncate(MAX_LIGHTS_BINDLESS);
    merged
}

/// Allocates and recycles atlas slots for shadow-casting lights, keyed by
/// [`PositionalLight::transform_hash`], with least-recently-used eviction
/// when the atlas is full.
pub struct ShadowAtlasCache {
    capacity: usize,
    slots: HashMap<u64, usize>,
    lru_order: Vec<u64>,
    free_slots: Vec<usize>,
    next_frame_visible_mesh_hash: HashMap<usize, u64>,
}

impl ShadowAtlasCache {
    /// An empty cache with `capacity` atlas slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: HashMap::new(),
            lru_order: Vec::new(),
            free_slots: (0..capacity).collect(),
            next_frame_visible_mesh_hash: HashMap::new(),
        }
    }

    fn touch(&mut self, hash: u64) {
        self.lru_order.retain(|h| *h != hash);
        self.lru_order.push(hash);
    }

    /// Return the atlas slot for `transform_hash`, allocating (evicting the
    /// LRU entry if necessary) if it is not already cached. Returns `None`
    /// only if `capacity == 0`.
    pub fn acquire_slot(&mut self, transform_hash: u64) -> Option<usize> {
        if let Some(&slot) = self.slots.get(&transform_hash) {
            self.touch(transform_hash);
            return Some(slot);
        }
        if self.capacity == 0 {
            return None;
        }

        let slot = if let Some(slot) = self.free_slots.pop() {
            slot
        } else {
            let evicted_hash = self.lru_order.remove(0);
            let slot = self.slots.remove(&evicted_hash).expect("lru entry tracked in slots");
            self.next_frame_visible_mesh_hash.remove(&slot);
            slot
        };

        self.slots.insert(transform_hash, slot);
        self.touch(transform_hash);
        Some(slot)
    }

    /// `true` if `transform_hash` already has a cached slot this frame.
    pub fn is_cached(&self, transform_hash: u64) -> bool {
        self.slots.contains_key(&transform_hash)
    }

    /// Number of slots currently in use.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` if no slots are in use.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Decide whether a shadow-casting light needs its depth re-rendered
    /// this frame: skipped only if the combined hash of its visible meshes
    /// matches what was rendered into its slot last time.
    pub fn needs_render(&mut self, slot: usize, visible_mesh_hash: u64) -> bool {
        let unchanged = self.next_frame_visible_mesh_hash.get(&slot) == Some(&visible_mesh_hash);
        self.next_frame_visible_mesh_hash.insert(slot, visible_mesh_hash);
        !unchanged
    }
}

/// Renders (or simulates rendering) shadow depth for one light's faces into
/// an atlas slot. A Vulkan backend implements this against the real device;
/// a variance-shadow-map path would render to a scratch target, downsample,
/// then copy into the atlas — that plumbing lives entirely in the backend's
/// implementation of this trait.
pub trait ShadowRenderer {
    /// Render `faces` worth of depth for the light into atlas `slot`.
    fn render_shadow_faces(&mut self, slot: usize, faces: u8);
}

/// Cluster grid dimensions for the per-voxel light bitmask. Z-slicing is
/// exponential: voxel `z` spans
/// `[2^(z / z_slice_log2_scale), 2^((z+1) / z_slice_log2_scale))` in view
/// depth, not a linear split.
#[derive(Debug, Clone, Copy)]
pub struct ClusterGrid {
    /// Cluster count along X.
    pub width: u32,
    /// Cluster count along Y.
    pub height: u32,
    /// Cluster count along Z (depth slices).
    pub depth: u32,
    /// Exponential scale applied to the Z axis.
    pub z_slice_log2_scale: f32,
}

impl ClusterGrid {
    /// Near/far bounds (in view-space depth) of voxel slice `z`.
    pub fn z_slice_bounds(&self, z: u32, near: f32, far: f32) -> (f32, f32) {
        let t0 = f32::from(z as u16) / self.z_slice_log2_scale;
        let t1 = f32::from((z + 1) as u16) / self.z_slice_log2_scale;
        let lerp = |t: f32| near * (far / near).powf(t.min(1.0));
        (lerp(t0), lerp(t1))
    }

    /// Total voxel count.
    pub fn voxel_count(&self) -> usize {
        (self.width * self.height * self.depth) as usize
    }
}

/// Word width of the per-voxel light bitmask; one bit per light up to
/// [`MAX_LIGHTS_BINDLESS`].
const BITMASK_WORDS: usize = MAX_LIGHTS_BINDLESS / 32;

/// Per-voxel bitmask + light-index range, the GPU buffer layout the
/// clustered shading shaders bind as the cluster transform/bitmask/range
/// descriptor.
#[derive(Debug, Clone)]
pub struct ClusterBuffers {
    /// `voxel_count` entries, each [`BITMASK_WORDS`] `u32`s.
    pub bitmask: Vec<[u32; BITMASK_WORDS]>,
}

/// Test whether a light's bounding sphere overlaps an axis-aligned voxel
/// box, in the same view space both are expressed in.
fn sphere_overlaps_voxel(light: &PositionalLight, voxel_min: Vec3, voxel_max: Vec3) -> bool {
    let clamp = |v: f32, lo: f32, hi: f32| v.clamp(lo, hi);
    let closest = Vec3::new(
        clamp(light.position.x, voxel_min.x, voxel_max.x),
        clamp(light.position.y, voxel_min.y, voxel_max.y),
        clamp(light.position.z, voxel_min.z, voxel_max.z),
    );
    (closest - light.position).norm_squared() <= light.radius * light.radius
}

/// Build the per-voxel bitmask for `lights` against `grid`, given each
/// voxel's world/view-space bounds via `voxel_bounds`.
pub fn build_cluster_bitmask(
    grid: &ClusterGrid,
    lights: &[PositionalLight],
    voxel_bounds: impl Fn(u32, u32, u32) -> (Vec3, Vec3),
) -> ClusterBuffers {
    let mut bitmask = vec![[0u32; BITMASK_WORDS]; grid.voxel_count()];

    for z in 0..grid.depth {
        for y in 0..grid.height {
            for x in 0..grid.width {
                let index = ((z * grid.height + y) * grid.width + x) as usize;
                let (voxel_min, voxel_max) = voxel_bounds(x, y, z);
                for (light_index, light) in lights.iter().enumerate().take(MAX_LIGHTS_BINDLESS) {
                    if sphere_overlaps_voxel(light, voxel_min, voxel_max) {
                        bitmask[index][light_index / 32] |= 1 << (light_index % 32);
                    }
                }
            }
        }
    }

    ClusterBuffers { bitmask }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(position: Vec3, radius: f32) -> PositionalLight {
        PositionalLight {
            position,
            radius,
            cookie: 0,
            last_timestamp: 0,
            shadow_enabled: false,
            shadow_faces: 1,
        }
    }

    #[test]
    fn gather_visible_lights_respects_frustum_test_and_cap() {
        let lights: Vec<_> = (0..10).map(|i| light(Vec3::new(i as f32, 0.0, 0.0), 1.0)).collect();
        let visible = gather_visible_lights(&lights, |l| l.position.x < 5.0);
        assert_eq!(visible.len(), 5);
    }

    #[test]
    fn shadow_atlas_evicts_lru_when_full() {
        let mut cache = ShadowAtlasCache::new(2);
        let a = cache.acquire_slot(1).unwrap();
        let b = cache.acquire_slot(2).unwrap();
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);

        // Touch `a` so `b` becomes the least-recently-used entry.
        cache.acquire_slot(1);
        let reused = cache.acquire_slot(3).unwrap();
        assert_eq!(reused, b);
        assert!(!cache.is_cached(2));
        assert!(cache.is_cached(1));
        assert!(cache.is_cached(3));
    }

    #[test]
    fn unchanged_visible_mesh_hash_skips_render() {
        let mut cache = ShadowAtlasCache::new(4);
        let slot = cache.acquire_slot(1).unwrap();
        assert!(cache.needs_render(slot, 0xAAAA));
        assert!(!cache.needs_render(slot, 0xAAAA));
        assert!(cache.needs_render(slot, 0xBBBB));
    }

    #[test]
    fn bitmask_sets_bit_only_for_overlapping_voxel() {
        let grid = ClusterGrid {
            width: 2,
            height: 1,
            depth: 1,
            z_slice_log2_scale: 4.0,
        };
        let lights = vec![light(Vec3::new(0.5, 0.5, 0.5), 0.4)];
        let buffers = build_cluster_bitmask(&grid, &lights, |x, _y, _z| {
            let min = Vec3::new(x as f32, 0.0, 0.0);
            (min, min + Vec3::new(1.0, 1.0, 1.0))
        });

        assert_ne!(buffers.bitmask[0][0] & 1, 0);
        assert_eq!(buffers.bitmask[1][0] & 1, 0);
    }

    #[test]
    fn z_slice_bounds_are_exponential() {
        let grid = ClusterGrid {
            width: 1,
            height: 1,
            depth: 64,
            z_slice_log2_scale: 4.0,
        };
        let (near0, far0) = grid.z_slice_bounds(0, 0.1, 100.0);
        let (near1, far1) = grid.z_slice_bounds(1, 0.1, 100.0);
        assert!((near0 - 0.1).abs() < 1e-5);
        assert!(far0 > near0);
        assert!(near1 >= far0 - 1e-5);
    }
}
