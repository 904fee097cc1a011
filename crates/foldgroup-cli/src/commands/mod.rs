pub mod contacts;
pub mod detect;
pub mod group;
pub mod search;

use crate::error::Result;
use crate::pdb;
use foldgroup::engine::manager::GroupingManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Collects structure files from a folder, sorted by name. A single file is
/// accepted as-is.
pub fn scan_structures(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        let is_structure = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                ext == "pdb" || ext == "ent"
            })
            .unwrap_or(false);
        if path.is_file() && is_structure {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parses and registers every file; unreadable files are skipped with a
/// warning. Returns the number of structures loaded.
pub fn load_structures(manager: &mut GroupingManager, files: &[PathBuf]) -> usize {
    let mut loaded = 0;
    for file in files {
        match pdb::read_structure(file) {
            Ok(model) => {
                manager.register_structure(file, Arc::new(model));
                loaded += 1;
            }
            Err(err) => warn!("Skipping '{}': {}", file.display(), err),
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn scan_filters_by_extension_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdb"), b"x").unwrap();
        fs::write(dir.path().join("a.PDB"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("c.ent"), b"x").unwrap();

        let files = scan_structures(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.PDB", "b.pdb", "c.ent"]);
    }

    #[test]
    fn scan_accepts_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.pdb");
        fs::write(&file, b"x").unwrap();
        assert_eq!(scan_structures(&file).unwrap(), vec![file]);
    }
}
