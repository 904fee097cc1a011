use crate::core::models::provider::{AtomSite, StructureProvider};
use crate::engine::designation::TargetDesignation;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// One match from a multi-structure binder search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderContactHit {
    /// The candidate structure file.
    pub file: PathBuf,
    /// Sorted, deduplicated residue numbers of the contacting binder residues.
    pub binder_residues: Vec<isize>,
    /// How many of the requested target residues this binder touches.
    pub target_residues_contacted: usize,
}

/// Evaluates one candidate structure against the requested target residues.
///
/// Role resolution uses the explicit designation when present; otherwise the
/// target chains are the query chains that exist in this structure and every
/// other chain is a binder. Returns `None` whenever the structure cannot
/// qualify: no binder chains, no requested residue resolves to atoms, or
/// fewer than `min_target_contacts` target residues are touched.
pub(crate) fn search_structure(
    file: &Path,
    provider: &dyn StructureProvider,
    designation: Option<&TargetDesignation>,
    target_residues: &[(char, isize)],
    cutoff: f64,
    min_target_contacts: usize,
) -> Option<BinderContactHit> {
    let present = provider.chain_ids();
    let (target_chains, binder_chains) = match designation {
        Some(designation) => (
            designation.target_chains.clone(),
            designation.binder_chains.clone(),
        ),
        None => {
            let query_chains: HashSet<char> =
                target_residues.iter().map(|(chain, _)| *chain).collect();
            let targets = present
                .iter()
                .copied()
                .filter(|chain| query_chains.contains(chain))
                .collect();
            let binders = present
                .iter()
                .copied()
                .filter(|chain| !query_chains.contains(chain))
                .collect();
            (targets, binders)
        }
    };
    if binder_chains.is_empty() {
        return None;
    }

    // Requested residues that resolve to atoms within the target chains.
    let mut residue_atoms: Vec<Vec<[f64; 3]>> = Vec::new();
    for &(chain, residue) in target_residues {
        if !target_chains.contains(&chain) {
            continue;
        }
        let sites = provider.atom_sites_of_residue(chain, residue);
        if sites.is_empty() {
            continue;
        }
        residue_atoms.push(sites.iter().map(coords).collect());
    }
    if residue_atoms.is_empty() {
        return None;
    }

    let binder_sites = provider.atom_sites_in_chains(&binder_chains);
    if binder_sites.is_empty() {
        return None;
    }

    // One index over all binder atoms; each target residue queries it.
    let binder_positions: Vec<[f64; 3]> = binder_sites.iter().map(coords).collect();
    let binder_tree: KdTree<f64, 3> = (&binder_positions).into();
    let cutoff_sq = cutoff * cutoff;

    let mut contacted = 0usize;
    let mut pooled: Vec<[f64; 3]> = Vec::new();
    for atoms in &residue_atoms {
        let touches = atoms.iter().any(|position| {
            binder_tree
                .nearest_one::<SquaredEuclidean>(position)
                .distance
                <= cutoff_sq
        });
        if touches {
            contacted += 1;
        }
        pooled.extend_from_slice(atoms);
    }
    if contacted < min_target_contacts {
        return None;
    }

    // Pooled index over every requested target atom gives the full set of
    // contacting binder residues in one pass.
    let target_tree: KdTree<f64, 3> = (&pooled).into();
    let mut binder_residues: BTreeSet<isize> = BTreeSet::new();
    for site in &binder_sites {
        if binder_residues.contains(&site.residue_id) {
            continue;
        }
        let nearest = target_tree.nearest_one::<SquaredEuclidean>(&coords(site));
        if nearest.distance <= cutoff_sq {
            binder_residues.insert(site.residue_id);
        }
    }

    Some(BinderContactHit {
        file: file.to_path_buf(),
        binder_residues: binder_residues.into_iter().collect(),
        target_residues_contacted: contacted,
    })
}

/// Orders hits so binders engaging more of the target epitope come first,
/// ties broken by binder interface size; the sort is stable beyond that.
pub(crate) fn sort_hits(hits: &mut [BinderContactHit]) {
    hits.sort_by(|a, b| {
        b.target_residues_contacted
            .cmp(&a.target_residues_contacted)
            .then(b.binder_residues.len().cmp(&a.binder_residues.len()))
    });
}

fn coords(site: &AtomSite) -> [f64; 3] {
    [site.position.x, site.position.y, site.position.z]
}
