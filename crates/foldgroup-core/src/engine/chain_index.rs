use crate::core::sequence::hash::chain_sequence_key;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Inverted index from a single-chain sequence key to the files containing
/// that chain.
///
/// Postings keep insertion order and are duplicate-free. The index is owned by
/// the grouping manager and populated incrementally as hashes are computed;
/// lookups on an unpopulated key fall back to a scan at the manager level.
#[derive(Debug, Default)]
pub struct ChainSequenceIndex {
    by_chain: HashMap<String, Vec<PathBuf>>,
}

impl ChainSequenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes one chain of one file and returns its chain key.
    pub fn index(&mut self, file: &Path, chain_id: char, sequence: &str) -> String {
        let key = chain_sequence_key(chain_id, sequence);
        self.insert_key(&key, file);
        key
    }

    /// Records that `file` contains the chain identified by `key`.
    pub fn insert_key(&mut self, key: &str, file: &Path) {
        let files = self.by_chain.entry(key.to_string()).or_default();
        if !files.iter().any(|f| f == file) {
            files.push(file.to_path_buf());
        }
    }

    /// Returns the files known to contain the chain identified by `key`.
    pub fn find_by_chain(&self, key: &str) -> &[PathBuf] {
        self.by_chain.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_chain.contains_key(key)
    }

    /// Removes `file` from the postings of the given keys.
    ///
    /// The keys come from the file's cache entry, so removal is exact.
    pub fn remove_file(&mut self, file: &Path, keys: &[String]) {
        for key in keys {
            if let Some(files) = self.by_chain.get_mut(key) {
                files.retain(|f| f != file);
                if files.is_empty() {
                    self.by_chain.remove(key);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_returns_key_and_records_file() {
        let mut index = ChainSequenceIndex::new();
        let key = index.index(Path::new("a.pdb"), 'A', "ACDEFG");
        assert_eq!(key, chain_sequence_key('A', "ACDEFG"));
        assert_eq!(index.find_by_chain(&key), &[PathBuf::from("a.pdb")]);
    }

    #[test]
    fn postings_are_duplicate_free_and_ordered() {
        let mut index = ChainSequenceIndex::new();
        let key = index.index(Path::new("a.pdb"), 'A', "ACD");
        index.index(Path::new("b.pdb"), 'A', "ACD");
        index.index(Path::new("a.pdb"), 'A', "ACD");
        assert_eq!(
            index.find_by_chain(&key),
            &[PathBuf::from("a.pdb"), PathBuf::from("b.pdb")]
        );
    }

    #[test]
    fn unknown_key_yields_empty_slice() {
        let index = ChainSequenceIndex::new();
        assert!(index.find_by_chain("ffffffffffff").is_empty());
    }

    #[test]
    fn remove_file_cleans_exactly_the_given_keys() {
        let mut index = ChainSequenceIndex::new();
        let key_a = index.index(Path::new("a.pdb"), 'A', "ACD");
        let key_b = index.index(Path::new("a.pdb"), 'B', "KLM");
        index.index(Path::new("b.pdb"), 'A', "ACD");

        index.remove_file(Path::new("a.pdb"), &[key_a.clone(), key_b.clone()]);

        assert_eq!(index.find_by_chain(&key_a), &[PathBuf::from("b.pdb")]);
        assert!(index.find_by_chain(&key_b).is_empty());
        assert!(!index.contains_key(&key_b));
    }
}
