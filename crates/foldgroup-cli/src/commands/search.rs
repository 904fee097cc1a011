use crate::cli::SearchArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::ui::ProgressRenderer;
use foldgroup::engine::config::SearchConfigBuilder;
use foldgroup::engine::manager::GroupingManager;
use foldgroup::engine::progress::{CancelToken, ProgressReporter};
use foldgroup::workflows::search::run_binder_search;

pub fn run(args: SearchArgs) -> Result<()> {
    let file_config = config::load(args.config.as_deref())?;
    let search_config = SearchConfigBuilder::new()
        .target_residues(parse_residue_list(&args.residues)?)
        .cutoff(args.cutoff.unwrap_or(file_config.search.cutoff))
        .min_target_contacts(
            args.min_contacts
                .unwrap_or(file_config.search.min_target_contacts),
        )
        .build()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let files = super::scan_structures(&args.input)?;
    let mut manager = GroupingManager::new();
    let loaded = super::load_structures(&mut manager, &files);
    if loaded == 0 {
        println!("No structures loaded from '{}'.", args.input.display());
        return Ok(());
    }

    let renderer = ProgressRenderer::new();
    let hits = {
        let reporter = ProgressReporter::with_callback(renderer.callback());
        run_binder_search(&manager, &search_config, &reporter, &CancelToken::new())?
    };

    if hits.is_empty() {
        println!(
            "No binders contact the requested residues within {:.1} A.",
            search_config.cutoff
        );
        return Ok(());
    }

    println!("{:<44} {:>8}  {}", "structure", "contacts", "binder residues");
    for hit in &hits {
        let residues: String = hit
            .binder_residues
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{:<44} {:>8}  {}",
            hit.file.display(),
            hit.target_residues_contacted,
            residues
        );
    }
    Ok(())
}

/// Parses `A:12,A:15`-style residue lists.
fn parse_residue_list(list: &str) -> Result<Vec<(char, isize)>> {
    let mut residues = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (chain, number) = part.split_once(':').ok_or_else(|| {
            CliError::Argument(format!("expected CHAIN:RESID, got '{}'", part))
        })?;
        let chain_id = single_char(chain.trim())
            .ok_or_else(|| CliError::Argument(format!("chain must be one character: '{}'", chain)))?;
        let residue_id = number.trim().parse().map_err(|_| {
            CliError::Argument(format!("invalid residue number '{}'", number))
        })?;
        residues.push((chain_id, residue_id));
    }
    if residues.is_empty() {
        return Err(CliError::Argument("no target residues given".to_string()));
    }
    Ok(residues)
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
