use crate::core::models::provider::{AtomSite, StructureProvider};
use crate::core::sequence::codes::{is_standard_amino_acid, one_letter_code};
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::HashMap;

/// Interface residues of one binder chain against a set of target chains.
///
/// Only standard amino-acid atoms participate. A binder residue is an
/// interface residue when any of its atoms lies within `cutoff` Angstroms
/// (inclusive) of any target atom; it is reported once, keyed by residue
/// number, with its one-letter code. Empty binder or target sets yield an
/// empty map.
///
/// The target atoms are held in a k-d tree, so the query costs
/// O((n + m) log(n + m)) instead of the naive O(n * m) pair scan.
pub fn interface_residues(
    provider: &dyn StructureProvider,
    binder_chain: char,
    target_chains: &[char],
    cutoff: f64,
) -> HashMap<isize, char> {
    let binder = protein_atoms(provider, &[binder_chain]);
    let target = protein_atoms(provider, target_chains);
    interface_side(&binder, &target, cutoff)
}

/// Runs [`interface_residues`] in both directions and returns
/// `(binder side, target side)`.
///
/// The two maps are independent directional results; they are exactly what
/// the two single-direction queries with swapped roles produce.
pub fn bidirectional_interface(
    provider: &dyn StructureProvider,
    binder_chain: char,
    target_chains: &[char],
    cutoff: f64,
) -> (HashMap<isize, char>, HashMap<isize, char>) {
    let binder = protein_atoms(provider, &[binder_chain]);
    let target = protein_atoms(provider, target_chains);
    (
        interface_side(&binder, &target, cutoff),
        interface_side(&target, &binder, cutoff),
    )
}

/// Interface residues for every ordered chain pair in the structure.
///
/// The outer key is the query chain, the inner key the partner chain; pairs
/// with no contacts are omitted entirely.
pub fn all_pair_interfaces(
    provider: &dyn StructureProvider,
    cutoff: f64,
) -> HashMap<char, HashMap<char, HashMap<isize, char>>> {
    let chains = provider.chain_ids();
    let atoms_by_chain: HashMap<char, Vec<AtomSite>> = chains
        .iter()
        .map(|&chain| (chain, protein_atoms(provider, &[chain])))
        .collect();

    let mut result: HashMap<char, HashMap<char, HashMap<isize, char>>> = HashMap::new();
    for &query in &chains {
        for &partner in &chains {
            if query == partner {
                continue;
            }
            let interface =
                interface_side(&atoms_by_chain[&query], &atoms_by_chain[&partner], cutoff);
            if !interface.is_empty() {
                result.entry(query).or_default().insert(partner, interface);
            }
        }
    }
    result
}

/// Like [`interface_residues`], but accumulates per binder residue the number
/// of target atoms within the cutoff instead of a code.
pub fn contact_counts(
    provider: &dyn StructureProvider,
    binder_chain: char,
    target_chains: &[char],
    cutoff: f64,
) -> HashMap<isize, usize> {
    let binder = protein_atoms(provider, &[binder_chain]);
    let target = protein_atoms(provider, target_chains);
    if binder.is_empty() || target.is_empty() {
        return HashMap::new();
    }

    let tree = build_tree(&target);
    let cutoff_sq = cutoff * cutoff;
    let mut counts: HashMap<isize, usize> = HashMap::new();
    for site in &binder {
        let neighbors = tree
            .within_unsorted::<SquaredEuclidean>(&coords(site), cutoff_sq)
            .len();
        if neighbors > 0 {
            *counts.entry(site.residue_id).or_insert(0) += neighbors;
        }
    }
    counts
}

pub(crate) fn interface_side(
    query_atoms: &[AtomSite],
    indexed_atoms: &[AtomSite],
    cutoff: f64,
) -> HashMap<isize, char> {
    if query_atoms.is_empty() || indexed_atoms.is_empty() {
        return HashMap::new();
    }

    let tree = build_tree(indexed_atoms);
    let cutoff_sq = cutoff * cutoff;
    let mut interface: HashMap<isize, char> = HashMap::new();
    for site in query_atoms {
        if interface.contains_key(&site.residue_id) {
            continue;
        }
        let nearest = tree.nearest_one::<SquaredEuclidean>(&coords(site));
        if nearest.distance <= cutoff_sq {
            interface.insert(site.residue_id, one_letter_code(&site.residue_name));
        }
    }
    interface
}

fn protein_atoms(provider: &dyn StructureProvider, chains: &[char]) -> Vec<AtomSite> {
    provider
        .atom_sites_in_chains(chains)
        .into_iter()
        .filter(|site| is_standard_amino_acid(&site.residue_name))
        .collect()
}

fn build_tree(atoms: &[AtomSite]) -> KdTree<f64, 3> {
    let positions: Vec<[f64; 3]> = atoms.iter().map(coords).collect();
    (&positions).into()
}

fn coords(site: &AtomSite) -> [f64; 3] {
    [site.position.x, site.position.y, site.position.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::provider::SequenceResidue;
    use nalgebra::Point3;

    struct MockStructure {
        atoms: Vec<AtomSite>,
    }

    impl MockStructure {
        fn new() -> Self {
            Self { atoms: Vec::new() }
        }

        fn atom(mut self, chain: char, residue: isize, name: &str, x: f64, y: f64, z: f64) -> Self {
            self.atoms.push(AtomSite {
                chain_id: chain,
                residue_id: residue,
                residue_name: name.to_string(),
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

    /// Chain A residues 1-3 at x=0, chain B residues 10-11 at x=3.
    fn two_chain_interface() -> MockStructure {
        MockStructure::new()
            .atom('A', 1, "ALA", 0.0, 0.0, 0.0)
            .atom('A', 2, "GLY", 0.0, 1.0, 0.0)
            .atom('A', 3, "SER", 0.0, 2.0, 0.0)
            .atom('B', 10, "LYS", 3.0, 0.0, 0.0)
            .atom('B', 11, "LEU", 3.0, 1.0, 0.0)
    }

    #[test]
    fn interface_marks_binder_residues_within_cutoff() {
        let structure = two_chain_interface();
        let interface = interface_residues(&structure, 'B', &['A'], 4.0);
        assert_eq!(interface.len(), 2);
        assert_eq!(interface.get(&10), Some(&'K'));
        assert_eq!(interface.get(&11), Some(&'L'));
    }

    #[test]
    fn interface_is_empty_beyond_cutoff() {
        let structure = two_chain_interface();
        assert!(interface_residues(&structure, 'B', &['A'], 2.0).is_empty());
    }

    #[test]
    fn cutoff_is_inclusive() {
        let structure = MockStructure::new()
            .atom('A', 1, "ALA", 0.0, 0.0, 0.0)
            .atom('B', 2, "GLY", 3.0, 0.0, 0.0);
        let interface = interface_residues(&structure, 'B', &['A'], 3.0);
        assert_eq!(interface.len(), 1);
    }

    #[test]
    fn larger_cutoff_is_a_superset() {
        let structure = two_chain_interface();
        let narrow = interface_residues(&structure, 'B', &['A'], 3.2);
        let wide = interface_residues(&structure, 'B', &['A'], 4.5);
        for residue in narrow.keys() {
            assert!(wide.contains_key(residue));
        }
        assert!(wide.len() >= narrow.len());
    }

    #[test]
    fn missing_chain_yields_empty_map() {
        let structure = two_chain_interface();
        assert!(interface_residues(&structure, 'Z', &['A'], 4.0).is_empty());
        assert!(interface_residues(&structure, 'B', &['Z'], 4.0).is_empty());
    }

    #[test]
    fn non_protein_atoms_are_ignored() {
        let structure = MockStructure::new()
            .atom('A', 1, "ALA", 0.0, 0.0, 0.0)
            .atom('B', 2, "HOH", 1.0, 0.0, 0.0)
            .atom('B', 3, "LYS", 50.0, 0.0, 0.0);
        assert!(interface_residues(&structure, 'B', &['A'], 4.0).is_empty());
    }

    #[test]
    fn non_standard_residue_that_is_protein_maps_to_sentinel() {
        // MSE is in the protein table but maps to 'M'; a sentinel only appears
        // through interface_side when the caller feeds unfiltered atoms.
        let binder = vec![AtomSite {
            chain_id: 'B',
            residue_id: 5,
            residue_name: "LIG".to_string(),
            position: Point3::new(1.0, 0.0, 0.0),
        }];
        let target = vec![AtomSite {
            chain_id: 'A',
            residue_id: 1,
            residue_name: "ALA".to_string(),
            position: Point3::new(0.0, 0.0, 0.0),
        }];
        let interface = interface_side(&binder, &target, 4.0);
        assert_eq!(interface.get(&5), Some(&'X'));
    }

    #[test]
    fn bidirectional_matches_two_single_direction_queries() {
        let structure = two_chain_interface();
        let (binder_side, target_side) = bidirectional_interface(&structure, 'B', &['A'], 4.0);
        assert_eq!(binder_side, interface_residues(&structure, 'B', &['A'], 4.0));
        assert_eq!(target_side, interface_residues(&structure, 'A', &['B'], 4.0));
        assert_eq!(target_side.len(), 3);
    }

    #[test]
    fn all_pairs_omits_empty_results() {
        let structure = MockStructure::new()
            .atom('A', 1, "ALA", 0.0, 0.0, 0.0)
            .atom('B', 2, "GLY", 2.0, 0.0, 0.0)
            .atom('C', 3, "LYS", 100.0, 0.0, 0.0);
        let pairs = all_pair_interfaces(&structure, 4.0);

        assert_eq!(pairs[&'A'][&'B'].len(), 1);
        assert_eq!(pairs[&'B'][&'A'].len(), 1);
        assert!(!pairs.contains_key(&'C'));
        assert!(!pairs[&'A'].contains_key(&'C'));
    }

    #[test]
    fn contact_counts_accumulate_neighboring_atoms() {
        let structure = MockStructure::new()
            .atom('A', 1, "ALA", 0.0, 0.0, 0.0)
            .atom('A', 2, "GLY", 0.0, 1.0, 0.0)
            .atom('B', 10, "LYS", 1.0, 0.0, 0.0)
            .atom('B', 10, "LYS", 1.0, 1.0, 0.0)
            .atom('B', 20, "LEU", 50.0, 0.0, 0.0);
        let counts = contact_counts(&structure, 'B', &['A'], 2.0);

        // Both residue-10 atoms see both target atoms.
        assert_eq!(counts.get(&10), Some(&4));
        assert!(!counts.contains_key(&20));
    }
}
