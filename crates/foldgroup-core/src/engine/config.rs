use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter {name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Parameters of a multi-structure binder search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Requested target residues as `(chain, residue number)` pairs.
    pub target_residues: Vec<(char, isize)>,
    /// Inclusive contact distance in Angstroms.
    pub cutoff: f64,
    /// Minimum number of distinct target residues a hit must touch.
    pub min_target_contacts: usize,
    /// Candidate files; empty means every registered structure.
    pub candidates: Vec<PathBuf>,
}

/// Parameters of batch grouping and target auto-detection.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingConfig {
    /// Fraction of structures a chain must appear in to count as a target.
    pub min_target_frequency: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_target_frequency: 0.5,
        }
    }
}

impl GroupingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_target_frequency > 0.0 && self.min_target_frequency <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "min_target_frequency",
                value: self.min_target_frequency,
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    target_residues: Option<Vec<(char, isize)>>,
    cutoff: Option<f64>,
    min_target_contacts: Option<usize>,
    candidates: Vec<PathBuf>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_residues(mut self, residues: Vec<(char, isize)>) -> Self {
        self.target_residues = Some(residues);
        self
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn min_target_contacts(mut self, count: usize) -> Self {
        self.min_target_contacts = Some(count);
        self
    }

    pub fn candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let target_residues = self
            .target_residues
            .filter(|residues| !residues.is_empty())
            .ok_or(ConfigError::MissingParameter("target_residues"))?;
        let cutoff = self.cutoff.unwrap_or(4.5);
        if cutoff <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "cutoff",
                value: cutoff,
            });
        }
        Ok(SearchConfig {
            target_residues,
            cutoff,
            min_target_contacts: self.min_target_contacts.unwrap_or(1),
            candidates: self.candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let config = SearchConfigBuilder::new()
            .target_residues(vec![('A', 1)])
            .build()
            .unwrap();
        assert_eq!(config.cutoff, 4.5);
        assert_eq!(config.min_target_contacts, 1);
        assert!(config.candidates.is_empty());
    }

    #[test]
    fn builder_requires_target_residues() {
        assert_eq!(
            SearchConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("target_residues")
        );
        assert_eq!(
            SearchConfigBuilder::new()
                .target_residues(vec![])
                .build()
                .unwrap_err(),
            ConfigError::MissingParameter("target_residues")
        );
    }

    #[test]
    fn builder_rejects_nonpositive_cutoff() {
        let err = SearchConfigBuilder::new()
            .target_residues(vec![('A', 1)])
            .cutoff(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { name: "cutoff", .. }));
    }

    #[test]
    fn grouping_config_validates_frequency_range() {
        assert!(GroupingConfig::default().validate().is_ok());
        let bad = GroupingConfig {
            min_target_frequency: 1.5,
        };
        assert!(bad.validate().is_err());
    }
}
