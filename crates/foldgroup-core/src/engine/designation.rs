use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-structure assignment of chains to the target and binder roles.
///
/// The two sets are intended to be disjoint, but overlap is permitted — the
/// UI flags it as unusual, the core does not reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDesignation {
    pub target_chains: Vec<char>,
    pub binder_chains: Vec<char>,
}

impl TargetDesignation {
    pub fn new(target_chains: Vec<char>, binder_chains: Vec<char>) -> Self {
        Self {
            target_chains,
            binder_chains,
        }
    }

    /// True when a chain appears in both roles.
    pub fn has_overlap(&self) -> bool {
        self.target_chains
            .iter()
            .any(|chain| self.binder_chains.contains(chain))
    }
}

/// Pure storage of target/binder designations, keyed by file.
///
/// Set overwrites, remove forgets; no validation beyond what the designation
/// type itself states.
#[derive(Debug, Default)]
pub struct TargetDesignationStore {
    map: HashMap<PathBuf, TargetDesignation>,
}

impl TargetDesignationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, file: &Path, target_chains: Vec<char>, binder_chains: Vec<char>) {
        self.map.insert(
            file.to_path_buf(),
            TargetDesignation::new(target_chains, binder_chains),
        );
    }

    pub fn get(&self, file: &Path) -> Option<&TargetDesignation> {
        self.map.get(file)
    }

    pub fn remove(&mut self, file: &Path) -> Option<TargetDesignation> {
        self.map.remove(file)
    }

    pub fn has(&self, file: &Path) -> bool {
        self.map.contains_key(file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &TargetDesignation)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
