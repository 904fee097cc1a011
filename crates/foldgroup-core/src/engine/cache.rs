use crate::core::models::provider::StructureProvider;
use crate::core::sequence::hash::{chain_sequence_key, sequence_key};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, warn};

/// Bumped whenever the entry layout or the hashing algorithm changes; any
/// side-car written under a different version is treated as a miss.
pub const CACHE_SCHEMA_VERSION: u32 = 3;

const SIDECAR_SUFFIX: &str = ".seqhash.json";
const PREVIEW_LENGTH: usize = 40;

/// Cached sequence-hash record for one structure file.
///
/// Valid iff `version` equals [`CACHE_SCHEMA_VERSION`] and `mtime` equals the
/// file's current modification time. `chain_keys` holds the single-chain keys
/// so unregistering a file can clean the chain index exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceHashEntry {
    pub version: u32,
    pub mtime: f64,
    pub hash_key: String,
    pub chains: Vec<String>,
    pub chain_keys: BTreeMap<String, String>,
    pub num_residues: usize,
    pub sequence_preview: String,
}

impl SequenceHashEntry {
    fn is_valid_for(&self, current_mtime: Option<f64>) -> bool {
        self.version == CACHE_SCHEMA_VERSION && current_mtime.is_some_and(|m| m == self.mtime)
    }
}

/// Content-addressed, disk-backed cache of per-file sequence hashes.
///
/// Lookup order is memory, then the JSON side-car next to the structure file,
/// then recomputation from a supplied provider. Disk failures in either
/// direction are logged and swallowed; a broken side-car never blocks the flow.
#[derive(Debug, Default)]
pub struct SequenceHashCache {
    entries: HashMap<PathBuf, SequenceHashEntry>,
}

impl SequenceHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached or freshly computed entry for `path`.
    ///
    /// Without a provider this can only serve from a valid cache layer; a stale
    /// or absent entry then yields `None` ("not available — load the structure
    /// first"). With a provider, a miss falls through to recomputation, and the
    /// result is persisted both in memory and to the side-car file.
    pub fn get_or_compute(
        &mut self,
        path: &Path,
        provider: Option<&dyn StructureProvider>,
    ) -> Option<SequenceHashEntry> {
        let current_mtime = file_mtime(path);

        if let Some(entry) = self.entries.get(path) {
            if entry.is_valid_for(current_mtime) {
                return Some(entry.clone());
            }
        }

        if let Some(entry) = read_sidecar(path) {
            if entry.is_valid_for(current_mtime) {
                self.entries.insert(path.to_path_buf(), entry.clone());
                return Some(entry);
            }
            debug!(path = %path.display(), "Stale cache side-car; recomputing");
        }

        let provider = provider?;
        let entry = compute_entry(provider, current_mtime.unwrap_or(0.0))?;
        self.entries.insert(path.to_path_buf(), entry.clone());
        write_sidecar(path, &entry);
        Some(entry)
    }

    /// Returns the in-memory entry for `path`, if any, without validity checks.
    pub fn get(&self, path: &Path) -> Option<&SequenceHashEntry> {
        self.entries.get(path)
    }

    /// Drops the in-memory entry for `path`.
    ///
    /// The side-car file stays on disk so a later session can reuse it; the
    /// structure file itself is never touched.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compute_entry(provider: &dyn StructureProvider, mtime: f64) -> Option<SequenceHashEntry> {
    let residues = provider.sequence_residues();
    let hash_key = sequence_key(&residues)?;

    // Per-chain sequences in file order.
    let mut chain_sequences: Vec<(char, String)> = Vec::new();
    for record in &residues {
        match chain_sequences.iter_mut().find(|(id, _)| *id == record.chain_id) {
            Some((_, sequence)) => sequence.push(record.code),
            None => chain_sequences.push((record.chain_id, record.code.to_string())),
        }
    }

    let chains: Vec<String> = chain_sequences
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    let chain_keys: BTreeMap<String, String> = chain_sequences
        .iter()
        .map(|(id, sequence)| (id.to_string(), chain_sequence_key(*id, sequence)))
        .collect();

    let full: String = chain_sequences
        .iter()
        .map(|(_, sequence)| sequence.as_str())
        .collect::<Vec<_>>()
        .join("/");
    let mut sequence_preview: String = full.chars().take(PREVIEW_LENGTH).collect();
    if full.chars().count() > PREVIEW_LENGTH {
        sequence_preview.push('…');
    }

    Some(SequenceHashEntry {
        version: CACHE_SCHEMA_VERSION,
        mtime,
        hash_key,
        chains,
        chain_keys,
        num_residues: provider.residue_count(),
        sequence_preview,
    })
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(SIDECAR_SUFFIX);
    path.with_file_name(name)
}

fn file_mtime(path: &Path) -> Option<f64> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs_f64())
}

fn read_sidecar(path: &Path) -> Option<SequenceHashEntry> {
    let sidecar = sidecar_path(path);
    let data = fs::read_to_string(&sidecar).ok()?;
    match serde_json::from_str(&data) {
        Ok(entry) => Some(entry),
        Err(err) => {
            debug!(path = %sidecar.display(), error = %err, "Ignoring undecodable cache side-car");
            None
        }
    }
}

fn write_sidecar(path: &Path, entry: &SequenceHashEntry) {
    let sidecar = sidecar_path(path);
    let result = serde_json::to_string(entry)
        .map_err(std::io::Error::other)
        .and_then(|data| fs::write(&sidecar, data));
    if let Err(err) = result {
        warn!(path = %sidecar.display(), error = %err, "Failed to persist hash cache side-car");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::provider::{AtomSite, SequenceResidue};
    use std::fs::File;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, SystemTime};

    struct CountingProvider {
        residues: Vec<SequenceResidue>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(chains: &[(char, &str)]) -> Self {
            let mut residues = Vec::new();
            for (chain_id, sequence) in chains {
                for (i, code) in sequence.chars().enumerate() {
                    residues.push(SequenceResidue {
                        chain_id: *chain_id,
                        residue_id: i as isize + 1,
                        code,
                    });
                }
            }
            Self {
                residues,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StructureProvider for CountingProvider {
        fn sequence_residues(&self) -> Vec<SequenceResidue> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.residues.clone()
        }

        fn chain_ids(&self) -> Vec<char> {
            let mut ids = Vec::new();
            for record in &self.residues {
                if !ids.contains(&record.chain_id) {
                    ids.push(record.chain_id);
                }
            }
            ids
        }

        fn residue_count(&self) -> usize {
            self.residues.len()
        }

        fn atom_sites(&self) -> Vec<AtomSite> {
            Vec::new()
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"MOCK STRUCTURE").unwrap();
        path
    }

    fn bump_mtime(path: &Path) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();
    }

    #[test]
    fn compute_requires_a_provider_on_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let mut cache = SequenceHashCache::new();
        assert!(cache.get_or_compute(&path, None).is_none());
    }

    #[test]
    fn second_call_serves_from_memory_without_recompute() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACDEFG")]);
        let mut cache = SequenceHashCache::new();

        let first = cache.get_or_compute(&path, Some(&provider)).unwrap();
        let second = cache.get_or_compute(&path, Some(&provider)).unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn entry_carries_chains_preview_and_residue_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACD"), ('B', "KLM")]);
        let mut cache = SequenceHashCache::new();

        let entry = cache.get_or_compute(&path, Some(&provider)).unwrap();
        assert_eq!(entry.chains, vec!["A", "B"]);
        assert_eq!(entry.num_residues, 6);
        assert_eq!(entry.sequence_preview, "ACD/KLM");
        assert_eq!(entry.hash_key.len(), 12);
        assert_eq!(entry.chain_keys.len(), 2);
    }

    #[test]
    fn sidecar_survives_into_a_fresh_cache_without_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACDEFG")]);

        let mut cache = SequenceHashCache::new();
        let original = cache.get_or_compute(&path, Some(&provider)).unwrap();

        let mut fresh = SequenceHashCache::new();
        let reloaded = fresh.get_or_compute(&path, None).unwrap();
        assert_eq!(original, reloaded);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn mtime_change_invalidates_memory_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACDEFG")]);
        let mut cache = SequenceHashCache::new();

        cache.get_or_compute(&path, Some(&provider)).unwrap();
        bump_mtime(&path);

        assert!(cache.get_or_compute(&path, None).is_none());
        cache.get_or_compute(&path, Some(&provider)).unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn version_mismatch_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACDEFG")]);

        let mut cache = SequenceHashCache::new();
        let mut entry = cache.get_or_compute(&path, Some(&provider)).unwrap();
        entry.version = CACHE_SCHEMA_VERSION - 1;
        fs::write(
            sidecar_path(&path),
            serde_json::to_string(&entry).unwrap(),
        )
        .unwrap();

        let mut fresh = SequenceHashCache::new();
        assert!(fresh.get_or_compute(&path, None).is_none());
    }

    #[test]
    fn corrupt_sidecar_is_a_miss_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        fs::write(sidecar_path(&path), b"{ not json").unwrap();

        let mut cache = SequenceHashCache::new();
        assert!(cache.get_or_compute(&path, None).is_none());

        let provider = CountingProvider::new(&[('A', "ACDEFG")]);
        assert!(cache.get_or_compute(&path, Some(&provider)).is_some());
    }

    #[test]
    fn empty_structure_has_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "empty.pdb");
        let provider = CountingProvider::new(&[]);
        let mut cache = SequenceHashCache::new();
        assert!(cache.get_or_compute(&path, Some(&provider)).is_none());
    }

    #[test]
    fn remove_drops_memory_but_keeps_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a.pdb");
        let provider = CountingProvider::new(&[('A', "ACDEFG")]);
        let mut cache = SequenceHashCache::new();

        cache.get_or_compute(&path, Some(&provider)).unwrap();
        assert!(cache.remove(&path));
        assert!(cache.get(&path).is_none());
        assert!(sidecar_path(&path).exists());

        // The side-car still serves a later lookup.
        assert!(cache.get_or_compute(&path, None).is_some());
    }

    #[test]
    fn preview_is_truncated_with_ellipsis() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "long.pdb");
        let sequence: String = std::iter::repeat('A').take(60).collect();
        let provider = CountingProvider::new(&[('A', &sequence)]);
        let mut cache = SequenceHashCache::new();

        let entry = cache.get_or_compute(&path, Some(&provider)).unwrap();
        assert_eq!(entry.sequence_preview.chars().count(), PREVIEW_LENGTH + 1);
        assert!(entry.sequence_preview.ends_with('…'));
    }
}
