use crate::cli::GroupArgs;
use crate::error::Result;
use crate::ui::ProgressRenderer;
use foldgroup::engine::manager::GroupingManager;
use foldgroup::engine::progress::{CancelToken, ProgressReporter};
use foldgroup::workflows::group::run_sequence_grouping;
use tracing::info;

pub fn run(args: GroupArgs) -> Result<()> {
    let files = super::scan_structures(&args.input)?;
    if files.is_empty() {
        println!("No structure files found in '{}'.", args.input.display());
        return Ok(());
    }

    let mut manager = GroupingManager::new();
    let loaded = super::load_structures(&mut manager, &files);
    info!("Loaded {} of {} structure files", loaded, files.len());

    let renderer = ProgressRenderer::new();
    let groups = {
        let reporter = ProgressReporter::with_callback(renderer.callback());
        run_sequence_grouping(&mut manager, &reporter, &CancelToken::new())?
    };

    println!(
        "{} sequence groups across {} structures:\n",
        groups.len(),
        loaded
    );
    for group in &groups {
        println!("{}  {}", group.key, group.name);
        for member in group.members() {
            println!("    {}", member.display());
        }
    }
    Ok(())
}
