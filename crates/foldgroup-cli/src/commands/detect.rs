use crate::cli::DetectArgs;
use crate::config;
use crate::error::{CliError, Result};
use foldgroup::engine::config::GroupingConfig;
use foldgroup::engine::manager::GroupingManager;
use foldgroup::engine::progress::ProgressReporter;
use foldgroup::workflows::group::run_target_detection;

pub fn run(args: DetectArgs) -> Result<()> {
    let file_config = config::load(args.config.as_deref())?;
    let grouping = GroupingConfig {
        min_target_frequency: args
            .min_frequency
            .unwrap_or(file_config.grouping.min_target_frequency),
    };
    grouping
        .validate()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let files = super::scan_structures(&args.input)?;
    let mut manager = GroupingManager::new();
    let loaded = super::load_structures(&mut manager, &files);
    if loaded < 2 {
        println!(
            "Target auto-detection needs at least 2 structures ({} loaded).",
            loaded
        );
        return Ok(());
    }

    // Detection overwrites designations unconditionally; without --force,
    // refuse rather than silently lose existing ones.
    if !args.force && !manager.designations().is_empty() {
        return Err(CliError::Argument(
            "existing target designations would be overwritten; re-run with --force".to_string(),
        ));
    }

    let outcome = run_target_detection(
        &mut manager,
        grouping.min_target_frequency,
        &ProgressReporter::new(),
    )?;
    if outcome.designations.is_empty() {
        println!("No shared target chain detected.");
        return Ok(());
    }

    println!(
        "Designated {} structures across {} target groups:\n",
        outcome.designations.len(),
        outcome.target_group_count
    );
    let mut rows: Vec<_> = outcome.designations.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    for (file, designation) in rows {
        println!(
            "{}  target: {}  binder: {}",
            file.display(),
            join_chains(&designation.target_chains),
            join_chains(&designation.binder_chains)
        );
    }
    Ok(())
}

fn join_chains(chains: &[char]) -> String {
    chains
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
