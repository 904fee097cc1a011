use crate::engine::config::SearchConfig;
use crate::engine::error::EngineError;
use crate::engine::manager::GroupingManager;
use crate::engine::progress::{CancelToken, Progress, ProgressReporter};
use crate::engine::search::{BinderContactHit, sort_hits};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Searches candidate structures for binders contacting the requested target
/// residues.
///
/// An empty candidate list means every registered structure. Cancellation is
/// checked between candidates; on cancellation no partial result is returned.
#[instrument(skip_all, name = "binder_search_workflow")]
pub fn run_binder_search(
    manager: &GroupingManager,
    config: &SearchConfig,
    reporter: &ProgressReporter,
    cancel: &CancelToken,
) -> Result<Vec<BinderContactHit>, EngineError> {
    let candidates: Vec<PathBuf> = if config.candidates.is_empty() {
        manager.registered_files().to_vec()
    } else {
        config.candidates.clone()
    };

    reporter.report(Progress::PhaseStart { name: "Searching" });
    reporter.report(Progress::TaskStart {
        total_steps: candidates.len() as u64,
    });

    let mut hits = Vec::new();
    for (done, file) in candidates.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                "Binder search cancelled after {} of {} candidates",
                done,
                candidates.len()
            );
            return Err(EngineError::Cancelled);
        }
        if let Some(hit) = manager.search_structure(
            file,
            &config.target_residues,
            config.cutoff,
            config.min_target_contacts,
        ) {
            hits.push(hit);
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    sort_hits(&mut hits);
    info!(
        "Binder search matched {} of {} candidates",
        hits.len(),
        candidates.len()
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::provider::{AtomSite, SequenceResidue, StructureProvider};
    use crate::engine::config::SearchConfigBuilder;
    use nalgebra::Point3;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct MockStructure {
        atoms: Vec<AtomSite>,
    }

    impl MockStructure {
        fn new() -> Self {
            Self { atoms: Vec::new() }
        }

        fn atom(mut self, chain: char, residue: isize, x: f64, y: f64, z: f64) -> Self {
            self.atoms.push(AtomSite {
                chain_id: chain,
                residue_id: residue,
                residue_name: "ALA".to_string(),
                position: Point3::new(x, y, z),
            });
            self
        }
    }

    impl StructureProvider for MockStructure {
        fn sequence_residues(&self) -> Vec<SequenceResidue> {
            Vec::new()
        }

        fn chain_ids(&self) -> Vec<char> {
            let mut ids = Vec::new();
            for site in &self.atoms {
                if !ids.contains(&site.chain_id) {
                    ids.push(site.chain_id);
                }
            }
            ids
        }

        fn residue_count(&self) -> usize {
            0
        }

        fn atom_sites(&self) -> Vec<AtomSite> {
            self.atoms.clone()
        }
    }

    fn close_pair(offset: f64) -> Arc<MockStructure> {
        Arc::new(
            MockStructure::new()
                .atom('A', 1, 0.0, 0.0, 0.0)
                .atom('A', 2, 0.0, 1.0, 0.0)
                .atom('B', 10, offset, 0.0, 0.0)
                .atom('B', 11, offset, 1.0, 0.0),
        )
    }

    #[test]
    fn search_workflow_defaults_to_all_registered_candidates() {
        let mut manager = GroupingManager::new();
        manager.register_structure(&PathBuf::from("near.pdb"), close_pair(3.0));
        manager.register_structure(&PathBuf::from("far.pdb"), close_pair(50.0));

        let config = SearchConfigBuilder::new()
            .target_residues(vec![('A', 1), ('A', 2)])
            .cutoff(4.0)
            .build()
            .unwrap();
        let hits = run_binder_search(
            &manager,
            &config,
            &ProgressReporter::new(),
            &CancelToken::new(),
        )
        .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file, PathBuf::from("near.pdb"));
        assert_eq!(hits[0].target_residues_contacted, 2);
    }

    #[test]
    fn cancelled_search_returns_no_partial_results() {
        let mut manager = GroupingManager::new();
        manager.register_structure(&PathBuf::from("near.pdb"), close_pair(3.0));

        let cancel = CancelToken::new();
        cancel.cancel();
        let config = SearchConfigBuilder::new()
            .target_residues(vec![('A', 1)])
            .build()
            .unwrap();
        let result = run_binder_search(&manager, &config, &ProgressReporter::new(), &cancel);
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }
}
