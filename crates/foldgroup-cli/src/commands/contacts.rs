use crate::cli::ContactsArgs;
use crate::error::{CliError, Result};
use crate::pdb;
use foldgroup::engine::contacts::{bidirectional_interface, interface_residues};
use std::collections::HashMap;

pub fn run(args: ContactsArgs) -> Result<()> {
    let targets = parse_chain_list(&args.targets)?;
    let model = pdb::read_structure(&args.input)?;

    if args.bidirectional {
        let (binder_side, target_side) =
            bidirectional_interface(&model, args.binder, &targets, args.cutoff);
        print_side(&format!("Binder chain {}", args.binder), &binder_side);
        print_side(&format!("Target chains {}", args.targets), &target_side);
    } else {
        let interface = interface_residues(&model, args.binder, &targets, args.cutoff);
        print_side(&format!("Binder chain {}", args.binder), &interface);
    }
    Ok(())
}

fn print_side(label: &str, interface: &HashMap<isize, char>) {
    if interface.is_empty() {
        println!("{}: no interface residues", label);
        return;
    }
    let mut rows: Vec<_> = interface.iter().collect();
    rows.sort_by_key(|(residue, _)| **residue);
    let formatted: Vec<String> = rows
        .iter()
        .map(|(residue, code)| format!("{}{}", code, residue))
        .collect();
    println!("{} ({} residues): {}", label, rows.len(), formatted.join(" "));
}

/// Parses `A,C`-style chain lists.
fn parse_chain_list(list: &str) -> Result<Vec<char>> {
    let mut chains = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => chains.push(c),
            _ => {
                return Err(CliError::Argument(format!(
                    "chain must be one character: '{}'",
                    part
                )));
            }
        }
    }
    if chains.is_empty() {
        return Err(CliError::Argument("no target chains given".to_string()));
    }
    Ok(chains)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chain_lists() {
        assert_eq!(parse_chain_list("A").unwrap(), vec!['A']);
        assert_eq!(parse_chain_list("A, C").unwrap(), vec!['A', 'C']);
    }

    #[test]
    fn rejects_multicharacter_chains_and_empty_lists() {
        assert!(parse_chain_list("AB").is_err());
        assert!(parse_chain_list("").is_err());
    }
}
