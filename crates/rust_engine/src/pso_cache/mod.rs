//! Content-addressed PSO cache, modeled on Fossilize's append-only
//! per-process archives and merged read-only database.
//!
//! A `Fossilize::StateRecorder`/`StateReplayer` pair normally wires directly
//! into the Vulkan device: every sampler/DSL/pipeline-layout/render-pass/
//! shader-module/pipeline creation is recorded, and on start-up a read-only
//! merged archive is replayed back into freshly created objects. Fossilize
//! itself is a C++ library with no Rust binding in this crate's dependency
//! stack, so the archive format here is a from-scratch equivalent:
//! `bincode`-encoded records, deduplicated by `(kind, content hash)`, with
//! the same `db.foz`/`merge.foz`/`<proc>.<pid>.foz` file layout and
//! atomic-rename promotion.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes for cache I/O. Individual record rejections during replay
/// are not modeled as errors — they are logged and dropped.
#[derive(Debug, Error)]
pub enum PsoCacheError {
    /// Reading or writing an archive file failed.
    #[error("pso cache io error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An archive file's bytes did not decode as a valid record stream.
    #[error("pso cache archive at {path} is corrupt: {source}")]
    Corrupt {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: bincode::Error,
    },
}

/// Categories of object Fossilize-style recording covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// `VkSampler`.
    Sampler,
    /// `VkSamplerYcbcrConversion`.
    YcbcrConversion,
    /// `VkDescriptorSetLayout`.
    DescriptorSetLayout,
    /// `VkPipelineLayout`.
    PipelineLayout,
    /// `VkRenderPass`.
    RenderPass,
    /// `VkShaderModule`.
    ShaderModule,
    /// `VkPipeline` (compute).
    ComputePipeline,
    /// `VkPipeline` (graphics).
    GraphicsPipeline,
}

/// Content hash over a record's canonical `Vk*CreateInfo` bytes. Fossilize
/// uses a cryptographic hash; this cache only needs collision avoidance
/// within a single cache directory, so this is a plain `std::hash::Hasher`
/// digest.
pub type ContentHash = u64;

/// One recorded object: its kind, its content hash, and the opaque
/// `Vk*CreateInfo` bytes that produced that hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// What kind of Vulkan object this describes.
    pub kind: RecordKind,
    /// Content hash of `payload`.
    pub hash: ContentHash,
    /// Canonical create-info bytes, opaque to this module.
    pub payload: Vec<u8>,
    /// Device features this record depends on; the replayer's
    /// [`FeatureFilter`] rejects records naming unsupported features.
    pub required_features: Vec<String>,
}

fn hash_payload(payload: &[u8]) -> ContentHash {
    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    hasher.finish()
}

impl Record {
    /// Build a record, computing its content hash from `payload`.
    pub fn new(kind: RecordKind, payload: Vec<u8>, required_features: Vec<String>) -> Self {
        let hash = hash_payload(&payload);
        Self {
            kind,
            hash,
            payload,
            required_features,
        }
    }
}

/// An in-memory archive: a deduplicated set of [`Record`]s keyed by
/// `(kind, hash)`.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    records: HashMap<(RecordKind, ContentHash), Record>,
}

impl Archive {
    /// An empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, replacing any existing entry with the same
    /// `(kind, hash)`. Returns `true` if this was a new entry.
    pub fn insert(&mut self, record: Record) -> bool {
        self.records.insert((record.kind, record.hash), record).is_none()
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the archive holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of records of a given kind.
    pub fn count(&self, kind: RecordKind) -> usize {
        self.records.keys().filter(|(k, _)| *k == kind).count()
    }

    /// Iterate all records.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Merge `other` into `self`, deduplicating by `(kind, hash)`.
    pub fn merge(&mut self, other: Archive) {
        for record in other.records.into_values() {
            self.records.entry((record.kind, record.hash)).or_insert(record);
        }
    }

    /// Load an archive from a `bincode`-encoded file.
    pub fn load(path: &Path) -> Result<Self, PsoCacheError> {
        let bytes = fs::read(path).map_err(|source| PsoCacheError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<Record> = bincode::deserialize(&bytes).map_err(|source| PsoCacheError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = Self::new();
        for record in records {
            archive.insert(record);
        }
        Ok(archive)
    }

    /// Write the archive to `path` as `bincode`-encoded bytes.
    pub fn save(&self, path: &Path) -> Result<(), PsoCacheError> {
        let records: Vec<&Record> = self.records.values().collect();
        let bytes = bincode::serialize(&records).map_err(|source| PsoCacheError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| PsoCacheError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Per-process append-only recorder. Mirrors `Fossilize::StateRecorder`:
/// every call adds at most one new record and the whole set is flushed to
/// `cache_dir/<proc>.<pid>.foz` on `finish`.
pub struct StateRecorder {
    archive: Archive,
}

impl StateRecorder {
    /// Start recording.
    pub fn new() -> Self {
        Self { archive: Archive::new() }
    }

    /// Record a new object. A record already present for the same
    /// `(kind, hash)` is not duplicated.
    pub fn record(&mut self, kind: RecordKind, payload: Vec<u8>, required_features: Vec<String>) {
        self.archive.insert(Record::new(kind, payload, required_features));
    }

    /// Flush everything recorded so far to `cache_dir/<process_name>.<pid>.foz`.
    pub fn finish(&self, cache_dir: &Path, process_name: &str) -> Result<PathBuf, PsoCacheError> {
        fs::create_dir_all(cache_dir).map_err(|source| PsoCacheError::Io {
            path: cache_dir.to_path_buf(),
            source,
        })?;
        let path = cache_dir.join(format!("{process_name}.{}.foz", std::process::id()));
        self.archive.save(&path)?;
        Ok(path)
    }
}

impl Default for StateRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate replayed records against the features the live device actually
/// supports. Unsupported entries are silently dropped, not counted as
/// errors.
pub trait FeatureFilter {
    /// `true` if every feature `record` requires is supported.
    fn accepts(&self, record: &Record) -> bool;
}

/// A filter backed by an explicit allow-list of supported feature names.
pub struct SupportedFeatureSet {
    supported: std::collections::HashSet<String>,
}

impl SupportedFeatureSet {
    /// Build a filter that accepts exactly the named features.
    pub fn new(supported: impl IntoIterator<Item = String>) -> Self {
        Self {
            supported: supported.into_iter().collect(),
        }
    }

    /// A filter that accepts every record regardless of required features.
    pub fn accept_all() -> Self {
        Self {
            supported: std::collections::HashSet::new(),
        }
    }
}

impl FeatureFilter for SupportedFeatureSet {
    fn accepts(&self, record: &Record) -> bool {
        if self.supported.is_empty() && record.required_features.is_empty() {
            return true;
        }
        record.required_features.iter().all(|f| self.supported.contains(f))
    }
}

/// Destination for replayed records; a Vulkan backend implements this to
/// actually create the `Vk*` objects. Tests use a counting stub.
pub trait ReplaySink {
    /// Attempt to materialize `record` against the live device. Returning
    /// `false` logs the entry as dropped without aborting the rest of the
    /// archive.
    fn replay(&mut self, record: &Record) -> bool;
}

/// Outcome of a single [`replay_archive`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records successfully handed to the sink.
    pub replayed: usize,
    /// Records rejected by the feature filter.
    pub feature_filtered: usize,
    /// Records the sink itself rejected.
    pub sink_rejected: usize,
}

/// Replay every record in `archive` against `sink`, honoring `filter`.
/// Continues past individual failures rather than aborting the whole
/// archive.
pub fn replay_archive(archive: &Archive, filter: &dyn FeatureFilter, sink: &mut dyn ReplaySink) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for record in archive.iter() {
        if !filter.accepts(record) {
            stats.feature_filtered += 1;
            log::debug!("pso cache: dropping {:?} (unsupported feature)", record.kind);
            continue;
        }
        if sink.replay(record) {
            stats.replayed += 1;
        } else {
            stats.sink_rejected += 1;
            log::warn!("pso cache: replay failed for {:?} hash {:x}", record.kind, record.hash);
        }
    }
    stats
}

/// Outcome of a start-up [`promote_on_startup`] merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionStats {
    /// Records present in the final `db.foz`.
    pub total_records: usize,
    /// Per-process archives consumed and removed.
    pub merged_files: usize,
}

const DB_FILE: &str = "db.foz";
const MERGE_FILE: &str = "merge.foz";

/// Merge every `*.foz` per-process archive in `cache_dir` (other than
/// `db.foz`/`merge.foz` themselves) into the existing `db.foz`, write the
/// result to `merge.foz`, and atomically rename it over `db.foz`. Consumed
/// per-process files are removed.
pub fn promote_on_startup(cache_dir: &Path) -> Result<PromotionStats, PsoCacheError> {
    fs::create_dir_all(cache_dir).map_err(|source| PsoCacheError::Io {
        path: cache_dir.to_path_buf(),
        source,
    })?;

    let db_path = cache_dir.join(DB_FILE);
    let mut merged = if db_path.exists() { Archive::load(&db_path)? } else { Archive::new() };

    let mut per_process_files = Vec::new();
    let entries = fs::read_dir(cache_dir).map_err(|source| PsoCacheError::Io {
        path: cache_dir.to_path_buf(),
        source,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name == DB_FILE || name == MERGE_FILE || !name.ends_with(".foz") {
            continue;
        }
        per_process_files.push(path);
    }

    for path in &per_process_files {
        let archive = Archive::load(path)?;
        merged.merge(archive);
    }

    let merge_path = cache_dir.join(MERGE_FILE);
    merged.save(&merge_path)?;
    fs::rename(&merge_path, &db_path).map_err(|source| PsoCacheError::Io {
        path: db_path.clone(),
        source,
    })?;

    for path in &per_process_files {
        let _ = fs::remove_file(path);
    }

    log::info!(
        "pso cache: promoted {} records from {} process archives into {}",
        merged.len(),
        per_process_files.len(),
        db_path.display()
    );

    Ok(PromotionStats {
        total_records: merged.len(),
        merged_files: per_process_files.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        accepted: usize,
    }

    impl ReplaySink for CountingSink {
        fn replay(&mut self, _record: &Record) -> bool {
            self.accepted += 1;
            true
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("granite_pso_cache_test_{name}_{:?}", std::thread::current().id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn payload_recycling_hash_is_deterministic() {
        let a = Record::new(RecordKind::Sampler, vec![1, 2, 3], vec![]);
        let b = Record::new(RecordKind::Sampler, vec![1, 2, 3], vec![]);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn archive_dedups_by_kind_and_hash() {
        let mut archive = Archive::new();
        assert!(archive.insert(Record::new(RecordKind::Sampler, vec![1], vec![])));
        assert!(!archive.insert(Record::new(RecordKind::Sampler, vec![1], vec![])));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn feature_filtered_records_are_dropped_not_errors() {
        let mut archive = Archive::new();
        archive.insert(Record::new(RecordKind::GraphicsPipeline, vec![1], vec!["sparseBinding".to_string()]));
        archive.insert(Record::new(RecordKind::GraphicsPipeline, vec![2], vec![]));

        let filter = SupportedFeatureSet::new(std::iter::empty());
        let mut sink = CountingSink { accepted: 0 };
        let stats = replay_archive(&archive, &filter, &mut sink);

        assert_eq!(stats.feature_filtered, 1);
        assert_eq!(stats.replayed, 1);
        assert_eq!(sink.accepted, 1);
    }

    #[test]
    fn startup_merge_dedups_across_process_archives() {
        let dir = temp_dir("merge");

        let mut w1 = StateRecorder::new();
        w1.record(RecordKind::Sampler, vec![10], vec![]);
        w1.record(RecordKind::GraphicsPipeline, vec![20], vec![]);
        w1.finish(&dir, "proc").unwrap();

        let mut w2 = StateRecorder::new();
        // Same payload bytes as W1's sampler, but a different kind: hash
        // collision across kinds must not collapse into one record.
        w2.record(RecordKind::GraphicsPipeline, vec![10], vec![]);
        w2.record(RecordKind::GraphicsPipeline, vec![20], vec![]);
        w2.finish(&dir, "proc").unwrap();

        let stats = promote_on_startup(&dir).unwrap();
        assert_eq!(stats.merged_files, 2);
        assert_eq!(stats.total_records, 3);

        let db = Archive::load(&dir.join(DB_FILE)).unwrap();
        assert_eq!(db.count(RecordKind::Sampler), 1);
        assert_eq!(db.count(RecordKind::GraphicsPipeline), 2);

        let remaining: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert!(remaining.iter().all(|n| n == DB_FILE));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn replay_idempotence() {
        let dir = temp_dir("idempotence");
        let mut recorder = StateRecorder::new();
        recorder.record(RecordKind::ShaderModule, vec![1, 2, 3], vec![]);
        recorder.finish(&dir, "proc").unwrap();
        promote_on_startup(&dir).unwrap();

        let archive = Archive::load(&dir.join(DB_FILE)).unwrap();
        let filter = SupportedFeatureSet::accept_all();

        let mut first = CountingSink { accepted: 0 };
        let stats_first = replay_archive(&archive, &filter, &mut first);
        let mut second = CountingSink { accepted: 0 };
        let stats_second = replay_archive(&archive, &filter, &mut second);

        assert_eq!(stats_first, stats_second);
        assert_eq!(first.accepted, second.accepted);

        let _ = fs::remove_dir_all(&dir);
    }
}
