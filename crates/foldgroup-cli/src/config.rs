use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_NAME: &str = "foldgroup.toml";

/// Optional TOML configuration file with per-command defaults.
///
/// CLI flags always win over file values.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub grouping: GroupingSection,
    pub search: SearchSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GroupingSection {
    pub min_target_frequency: f64,
}

impl Default for GroupingSection {
    fn default() -> Self {
        Self {
            min_target_frequency: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub cutoff: f64,
    pub min_target_contacts: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            cutoff: 4.5,
            min_target_contacts: 1,
        }
    }
}

/// Loads the configuration file.
///
/// An explicit path must exist and parse; without one, `foldgroup.toml` in
/// the working directory is used when present, and built-in defaults
/// otherwise.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_NAME);
            if !implicit.exists() {
                return Ok(FileConfig::default());
            }
            implicit.to_path_buf()
        }
    };

    let data = std::fs::read_to_string(&path).map_err(|e| {
        CliError::Config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    toml::from_str(&data)
        .map_err(|e| CliError::Config(format!("cannot parse '{}': {}", path.display(), e)))
}
