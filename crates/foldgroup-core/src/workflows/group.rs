use crate::engine::designation::TargetDesignation;
use crate::engine::error::EngineError;
use crate::engine::groups::StructureGroup;
use crate::engine::manager::GroupingManager;
use crate::engine::progress::{CancelToken, Progress, ProgressReporter};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Result of a target auto-detection run: the designations written, plus the
/// number of target groups now derivable from them (for UI feedback).
#[derive(Debug)]
pub struct TargetDetectionOutcome {
    pub designations: HashMap<PathBuf, TargetDesignation>,
    pub target_group_count: usize,
}

/// Hashes every registered structure, then derives the exact-sequence groups.
///
/// Cancellation is checked between files during the hashing phase; on
/// cancellation no partial group list is returned.
#[instrument(skip_all, name = "sequence_grouping_workflow")]
pub fn run_sequence_grouping(
    manager: &mut GroupingManager,
    reporter: &ProgressReporter,
    cancel: &CancelToken,
) -> Result<Vec<StructureGroup>, EngineError> {
    let files: Vec<PathBuf> = manager.registered_files().to_vec();

    // === Phase 1: Hash every structure (cache-backed) ===
    reporter.report(Progress::PhaseStart { name: "Hashing" });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });
    for (done, file) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            info!("Sequence grouping cancelled after {} of {} files", done, files.len());
            return Err(EngineError::Cancelled);
        }
        manager.hash_structure(file);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Bucket by sequence key ===
    reporter.report(Progress::PhaseStart { name: "Grouping" });
    let groups = manager.compute_sequence_groups();
    reporter.report(Progress::PhaseFinish);

    Ok(groups)
}

/// Runs target auto-detection over the registered structures.
///
/// Existing designations for affected files are overwritten; callers wanting
/// a confirmation step must ask before invoking this.
#[instrument(skip_all, name = "target_detection_workflow")]
pub fn run_target_detection(
    manager: &mut GroupingManager,
    min_frequency: f64,
    reporter: &ProgressReporter,
) -> Result<TargetDetectionOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Detecting targets",
    });
    let designations = manager.auto_detect_targets(min_frequency);
    let target_group_count = manager.compute_target_groups().len();
    reporter.report(Progress::PhaseFinish);

    info!(
        "Target detection produced {} designations across {} target groups",
        designations.len(),
        target_group_count
    );
    Ok(TargetDetectionOutcome {
        designations,
        target_group_count,
    })
}
