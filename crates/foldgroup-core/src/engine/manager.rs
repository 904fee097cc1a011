use super::cache::{SequenceHashCache, SequenceHashEntry};
use super::chain_index::ChainSequenceIndex;
use super::contacts;
use super::designation::{TargetDesignation, TargetDesignationStore};
use super::groups::{CustomGroupStore, GroupKind, StructureGroup};
use super::search::{self, BinderContactHit};
use crate::core::models::provider::StructureProvider;
use crate::core::sequence::hash::{chain_sequence_key, sequence_key_for_chains};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Bucket key for target-group members without a usable binder designation.
const UNDESIGNATED_KEY: &str = "undesignated";

/// Owns the grouping state for a session: registered structure providers, the
/// sequence-hash cache, the chain index, target/binder designations, and
/// custom groups.
///
/// The manager performs no internal locking. The caller must ensure at most
/// one mutating call (registration, hash computation, designation change,
/// group recomputation) is in flight at a time; reads concurrent with a
/// mutation are likewise unsynchronized. Driving the manager from a single
/// background worker satisfies this.
#[derive(Default)]
pub struct GroupingManager {
    providers: HashMap<PathBuf, Arc<dyn StructureProvider>>,
    order: Vec<PathBuf>,
    cache: SequenceHashCache,
    chain_index: ChainSequenceIndex,
    designations: TargetDesignationStore,
    custom_groups: CustomGroupStore,
    sequence_groups: Vec<StructureGroup>,
}

impl GroupingManager {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Registration -----------------------------------------------------

    /// Registers (or replaces) the provider for a structure file and warms
    /// the hash cache and chain index for it.
    pub fn register_structure(&mut self, path: &Path, provider: Arc<dyn StructureProvider>) {
        if !self.providers.contains_key(path) {
            self.order.push(path.to_path_buf());
        }
        self.providers.insert(path.to_path_buf(), provider);
        debug!(path = %path.display(), "Registered structure");
        self.hash_structure(path);
    }

    /// Removes a structure from the manager: its provider handle, in-memory
    /// cache entry, chain-index postings, and designation.
    ///
    /// Index cleanup is exact — the cache entry records each chain's key, so
    /// exactly this file's postings are removed.
    pub fn unregister_structure(&mut self, path: &Path) -> bool {
        let existed = self.providers.remove(path).is_some();
        if existed {
            self.order.retain(|p| p != path);
        }
        if let Some(entry) = self.cache.get(path) {
            let keys: Vec<String> = entry.chain_keys.values().cloned().collect();
            self.chain_index.remove_file(path, &keys);
        }
        self.cache.remove(path);
        self.designations.remove(path);
        if existed {
            debug!(path = %path.display(), "Unregistered structure");
        }
        existed
    }

    pub fn is_registered(&self, path: &Path) -> bool {
        self.providers.contains_key(path)
    }

    pub fn provider(&self, path: &Path) -> Option<&Arc<dyn StructureProvider>> {
        self.providers.get(path)
    }

    /// Registered files in registration order.
    pub fn registered_files(&self) -> &[PathBuf] {
        &self.order
    }

    // --- Hashing and the chain index --------------------------------------

    /// Returns the sequence-hash entry for a file, consulting the cache
    /// before recomputing, and populates the chain index from the result.
    ///
    /// Returns `None` when no valid cache layer exists and the file has no
    /// registered provider to compute from.
    pub fn hash_structure(&mut self, path: &Path) -> Option<SequenceHashEntry> {
        let provider = self.providers.get(path).cloned();
        let entry = self.cache.get_or_compute(path, provider.as_deref())?;
        for key in entry.chain_keys.values() {
            self.chain_index.insert_key(key, path);
        }
        Some(entry)
    }

    /// Returns the cached entry for a file without recomputing.
    pub fn sequence_entry(&self, path: &Path) -> Option<&SequenceHashEntry> {
        self.cache.get(path)
    }

    /// Finds every registered structure containing this exact chain.
    ///
    /// Uses the chain index when it has a posting for the key; otherwise
    /// falls back to a scan over all registered structures, indexing chains
    /// as it goes so later queries take the fast path.
    pub fn find_structures_with_chain(&mut self, chain_id: char, sequence: &str) -> Vec<PathBuf> {
        let key = chain_sequence_key(chain_id, sequence);
        if self.chain_index.contains_key(&key) {
            return self.chain_index.find_by_chain(&key).to_vec();
        }

        let mut matches = Vec::new();
        for file in self.order.clone() {
            let residues = match self.providers.get(&file) {
                Some(provider) => provider.sequence_residues(),
                None => continue,
            };
            for (chain, chain_sequence) in chain_sequences_in_order(&residues) {
                let candidate = self.chain_index.index(&file, chain, &chain_sequence);
                if candidate == key && !matches.contains(&file) {
                    matches.push(file.clone());
                }
            }
        }
        matches
    }

    // --- Sequence groups ---------------------------------------------------

    /// Recomputes the exact-sequence groups from scratch over all registered
    /// structures, replacing the previous sequence-group set.
    ///
    /// Structures whose hash is not available are excluded.
    pub fn compute_sequence_groups(&mut self) -> Vec<StructureGroup> {
        let files = self.order.clone();
        let mut key_order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, StructureGroup> = HashMap::new();

        for file in &files {
            let Some(entry) = self.hash_structure(file) else {
                debug!(path = %file.display(), "No sequence hash available; excluded from grouping");
                continue;
            };
            let group = buckets.entry(entry.hash_key.clone()).or_insert_with(|| {
                let mut group = StructureGroup::new(
                    &entry.hash_key,
                    "",
                    GroupKind::Sequence,
                    &entry.hash_key,
                );
                group
                    .metadata
                    .insert("chains".to_string(), entry.chains.join(","));
                group.metadata.insert(
                    "sequence_preview".to_string(),
                    entry.sequence_preview.clone(),
                );
                key_order.push(entry.hash_key.clone());
                group
            });
            group.push_member(file);
        }

        let mut groups = Vec::with_capacity(key_order.len());
        for key in key_order {
            if let Some(mut group) = buckets.remove(&key) {
                let label = group
                    .metadata
                    .get("sequence_preview")
                    .cloned()
                    .unwrap_or_else(|| key.clone());
                group.name = format!("{} ({})", label, group.count());
                groups.push(group);
            }
        }

        info!(
            "Derived {} sequence groups from {} structures",
            groups.len(),
            files.len()
        );
        self.sequence_groups = groups.clone();
        groups
    }

    /// The sequence-group set produced by the last
    /// [`compute_sequence_groups`](Self::compute_sequence_groups) call.
    pub fn sequence_groups(&self) -> &[StructureGroup] {
        &self.sequence_groups
    }

    // --- Designations and target groups ------------------------------------

    pub fn set_designation(
        &mut self,
        path: &Path,
        target_chains: Vec<char>,
        binder_chains: Vec<char>,
    ) {
        self.designations.set(path, target_chains, binder_chains);
    }

    pub fn designation(&self, path: &Path) -> Option<&TargetDesignation> {
        self.designations.get(path)
    }

    pub fn remove_designation(&mut self, path: &Path) -> bool {
        self.designations.remove(path).is_some()
    }

    pub fn has_designation(&self, path: &Path) -> bool {
        self.designations.has(path)
    }

    pub fn designations(&self) -> &TargetDesignationStore {
        &self.designations
    }

    /// The hash of the sorted `chain:sequence` pairs restricted to the file's
    /// designated target chains; `None` when no target chains are set or the
    /// file has no registered provider.
    pub fn target_sequence_key(&self, path: &Path) -> Option<String> {
        let designation = self.designations.get(path)?;
        if designation.target_chains.is_empty() {
            return None;
        }
        let provider = self.providers.get(path)?;
        sequence_key_for_chains(&provider.sequence_residues(), &designation.target_chains)
    }

    /// Binder-side counterpart of [`target_sequence_key`](Self::target_sequence_key).
    pub fn binder_sequence_key(&self, path: &Path) -> Option<String> {
        let designation = self.designations.get(path)?;
        if designation.binder_chains.is_empty() {
            return None;
        }
        let provider = self.providers.get(path)?;
        sequence_key_for_chains(&provider.sequence_residues(), &designation.binder_chains)
    }

    /// Derives target groups purely from the current designations.
    ///
    /// Files without a resolvable target sequence key are excluded.
    pub fn compute_target_groups(&self) -> Vec<StructureGroup> {
        let mut key_order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, StructureGroup> = HashMap::new();

        for file in &self.order {
            let Some(designation) = self.designations.get(file) else {
                continue;
            };
            let Some(key) = self.target_sequence_key(file) else {
                debug!(path = %file.display(), "No target sequence key; excluded from target grouping");
                continue;
            };
            let group = buckets.entry(key.clone()).or_insert_with(|| {
                let mut group = StructureGroup::new(&key, "", GroupKind::Target, &key);
                let chains: String = designation
                    .target_chains
                    .iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                group.metadata.insert("target_chains".to_string(), chains);
                key_order.push(key.clone());
                group
            });
            group.push_member(file);
        }

        let mut groups = Vec::with_capacity(key_order.len());
        for key in key_order {
            if let Some(mut group) = buckets.remove(&key) {
                let chains = group
                    .metadata
                    .get("target_chains")
                    .cloned()
                    .unwrap_or_default();
                group.name = format!("Target {} ({} binders)", chains, group.count());
                groups.push(group);
            }
        }
        groups
    }

    /// Buckets the members of a target group by binder sequence key.
    ///
    /// Members lacking a usable designation land in an explicit
    /// "undesignated" bucket instead of being dropped, and singleton buckets
    /// are returned as-is so the UI can show ungrouped members distinctly.
    pub fn compute_binder_subgroups(&self, target_group: &StructureGroup) -> Vec<StructureGroup> {
        let mut key_order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, StructureGroup> = HashMap::new();

        for file in target_group.members() {
            let key = self
                .binder_sequence_key(file)
                .unwrap_or_else(|| UNDESIGNATED_KEY.to_string());
            let group = buckets.entry(key.clone()).or_insert_with(|| {
                let mut group = StructureGroup::new(&key, "", GroupKind::BinderSubgroup, &key);
                group
                    .metadata
                    .insert("parent_group".to_string(), target_group.id.clone());
                key_order.push(key.clone());
                group
            });
            group.push_member(file);
        }

        let mut groups = Vec::with_capacity(key_order.len());
        for key in key_order {
            if let Some(mut group) = buckets.remove(&key) {
                group.name = if key == UNDESIGNATED_KEY {
                    format!("No binder designation ({})", group.count())
                } else {
                    format!("Binder {} ({})", key, group.count())
                };
                groups.push(group);
            }
        }
        groups
    }

    /// Detects shared target chains across the registered structures by
    /// chain-sequence frequency and writes the resulting designations.
    ///
    /// A chain sequence occurring in at least `max(2, floor(n * min_frequency))`
    /// distinct structures counts as a target; each structure is designated
    /// only if that leaves it with at least one target and one binder chain.
    /// Existing designations for affected files are overwritten — callers
    /// that want confirmation must ask before invoking this.
    pub fn auto_detect_targets(
        &mut self,
        min_frequency: f64,
    ) -> HashMap<PathBuf, TargetDesignation> {
        let total = self.order.len();
        if total < 2 {
            info!("Target auto-detection needs at least 2 structures; nothing to do");
            return HashMap::new();
        }

        let mut occurrences: HashMap<String, HashSet<PathBuf>> = HashMap::new();
        let mut per_file: Vec<(PathBuf, Vec<(char, String)>)> = Vec::new();
        for file in &self.order {
            let Some(provider) = self.providers.get(file) else {
                continue;
            };
            let residues = provider.sequence_residues();
            let chain_keys: Vec<(char, String)> = chain_sequences_in_order(&residues)
                .into_iter()
                .map(|(chain, sequence)| (chain, chain_sequence_key(chain, &sequence)))
                .collect();
            for (_, key) in &chain_keys {
                occurrences
                    .entry(key.clone())
                    .or_default()
                    .insert(file.clone());
            }
            per_file.push((file.clone(), chain_keys));
        }

        let threshold = std::cmp::max(2, (total as f64 * min_frequency).floor() as usize);
        let target_keys: HashSet<String> = occurrences
            .into_iter()
            .filter(|(_, files)| files.len() >= threshold)
            .map(|(key, _)| key)
            .collect();
        if target_keys.is_empty() {
            info!(
                "No chain sequence occurs in at least {} structures; no targets detected",
                threshold
            );
            return HashMap::new();
        }

        let mut result = HashMap::new();
        for (file, chain_keys) in per_file {
            let mut target_chains = Vec::new();
            let mut binder_chains = Vec::new();
            for (chain, key) in chain_keys {
                if target_keys.contains(&key) {
                    target_chains.push(chain);
                } else {
                    binder_chains.push(chain);
                }
            }
            if target_chains.is_empty() || binder_chains.is_empty() {
                continue;
            }
            self.designations
                .set(&file, target_chains.clone(), binder_chains.clone());
            result.insert(file, TargetDesignation::new(target_chains, binder_chains));
        }

        info!(
            "Auto-detected target designations for {} of {} structures",
            result.len(),
            total
        );
        result
    }

    // --- Contact queries ----------------------------------------------------

    /// Interface residues of `binder_chain` against `target_chains` in one
    /// registered structure. `None` when the file is not registered.
    pub fn interface_residues(
        &self,
        path: &Path,
        binder_chain: char,
        target_chains: &[char],
        cutoff: f64,
    ) -> Option<HashMap<isize, char>> {
        let provider = self.providers.get(path)?;
        Some(contacts::interface_residues(
            provider.as_ref(),
            binder_chain,
            target_chains,
            cutoff,
        ))
    }

    /// Both directions of an interface query; see
    /// [`contacts::bidirectional_interface`].
    pub fn bidirectional_interface(
        &self,
        path: &Path,
        binder_chain: char,
        target_chains: &[char],
        cutoff: f64,
    ) -> Option<(HashMap<isize, char>, HashMap<isize, char>)> {
        let provider = self.providers.get(path)?;
        Some(contacts::bidirectional_interface(
            provider.as_ref(),
            binder_chain,
            target_chains,
            cutoff,
        ))
    }

    /// Interface residues for every ordered chain pair of one structure.
    pub fn all_pair_interfaces(
        &self,
        path: &Path,
        cutoff: f64,
    ) -> Option<HashMap<char, HashMap<char, HashMap<isize, char>>>> {
        let provider = self.providers.get(path)?;
        Some(contacts::all_pair_interfaces(provider.as_ref(), cutoff))
    }

    /// Per-residue contact counts; see [`contacts::contact_counts`].
    pub fn contact_counts(
        &self,
        path: &Path,
        binder_chain: char,
        target_chains: &[char],
        cutoff: f64,
    ) -> Option<HashMap<isize, usize>> {
        let provider = self.providers.get(path)?;
        Some(contacts::contact_counts(
            provider.as_ref(),
            binder_chain,
            target_chains,
            cutoff,
        ))
    }

    /// Evaluates one candidate file for the binder search; `None` when it is
    /// not registered or does not qualify.
    pub fn search_structure(
        &self,
        path: &Path,
        target_residues: &[(char, isize)],
        cutoff: f64,
        min_target_contacts: usize,
    ) -> Option<BinderContactHit> {
        let provider = self.providers.get(path)?;
        search::search_structure(
            path,
            provider.as_ref(),
            self.designations.get(path),
            target_residues,
            cutoff,
            min_target_contacts,
        )
    }

    /// Searches the candidate files for binders contacting the requested
    /// target residues, ranked by distinct target residues contacted, then by
    /// binder interface size.
    pub fn find_binders_contacting(
        &self,
        target_residues: &[(char, isize)],
        cutoff: f64,
        candidates: &[PathBuf],
        min_target_contacts: usize,
    ) -> Vec<BinderContactHit> {
        let mut hits = Vec::new();
        for file in candidates {
            if !self.providers.contains_key(file) {
                debug!(path = %file.display(), "Candidate has no registered structure; skipped");
                continue;
            }
            if let Some(hit) =
                self.search_structure(file, target_residues, cutoff, min_target_contacts)
            {
                hits.push(hit);
            }
        }
        search::sort_hits(&mut hits);
        hits
    }

    // --- Custom groups ------------------------------------------------------

    pub fn create_custom_group(
        &mut self,
        name: &str,
        members: &[PathBuf],
        metadata: HashMap<String, String>,
    ) -> String {
        self.custom_groups.create(name, members, metadata)
    }

    pub fn rename_custom_group(&mut self, id: &str, name: &str) -> bool {
        self.custom_groups.rename(id, name)
    }

    pub fn delete_custom_group(&mut self, id: &str) -> bool {
        self.custom_groups.delete(id)
    }

    pub fn add_custom_group_members(&mut self, id: &str, files: &[PathBuf]) -> usize {
        self.custom_groups.add_members(id, files)
    }

    pub fn remove_custom_group_members(&mut self, id: &str, files: &[PathBuf]) -> usize {
        self.custom_groups.remove_members(id, files)
    }

    pub fn custom_group(&self, id: &str) -> Option<&StructureGroup> {
        self.custom_groups.get(id)
    }

    pub fn custom_groups(&self) -> Vec<&StructureGroup> {
        self.custom_groups.list()
    }
}

/// Per-chain sequences in file order, merged across non-contiguous runs of
/// the same chain.
fn chain_sequences_in_order(
    residues: &[crate::core::models::provider::SequenceResidue],
) -> Vec<(char, String)> {
    let mut sequences: Vec<(char, String)> = Vec::new();
    for record in residues {
        match sequences.iter_mut().find(|(id, _)| *id == record.chain_id) {
            Some((_, sequence)) => sequence.push(record.code),
            None => sequences.push((record.chain_id, record.code.to_string())),
        }
    }
    sequences
}
