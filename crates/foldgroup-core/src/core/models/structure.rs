use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::provider::{AtomSite, SequenceResidue, StructureProvider};
use super::residue::Residue;
use crate::core::sequence::codes::one_letter_code;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents a complete structure with chains, residues, and atoms.
///
/// This struct is the reference implementation of [`StructureProvider`]: an
/// arena-backed container with stable IDs and lookup maps for chain and
/// residue access. Parsers fill it in file order, which is the order the
/// provider interface then reports.
#[derive(Debug, Clone, Default)]
pub struct StructureModel {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chain insertion order, so iteration matches file order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain ID and residue number.
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl StructureModel {
    /// Creates a new, empty structure model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in insertion (file) order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID and residue number.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Adds a new chain to the model or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to the model or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the given chain ID and
    /// residue number already exists, it returns the existing residue ID.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if the
    /// chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if the
    /// residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        let atom_id = self.atoms.insert(atom);
        let residue = self.residues.get_mut(residue_id).unwrap();
        residue.add_atom(atom_id);

        Some(atom_id)
    }

    /// Returns the total number of atoms in the model.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
}

impl StructureProvider for StructureModel {
    fn sequence_residues(&self) -> Vec<SequenceResidue> {
        let mut records = Vec::with_capacity(self.residues.len());
        for (_, chain) in self.chains_iter() {
            for &residue_id in chain.residues() {
                if let Some(residue) = self.residues.get(residue_id) {
                    records.push(SequenceResidue {
                        chain_id: chain.id,
                        residue_id: residue.id,
                        code: one_letter_code(&residue.name),
                    });
                }
            }
        }
        records
    }

    fn chain_ids(&self) -> Vec<char> {
        self.chains_iter().map(|(_, chain)| chain.id).collect()
    }

    fn residue_count(&self) -> usize {
        self.residues.len()
    }

    fn atom_sites(&self) -> Vec<AtomSite> {
        let mut sites = Vec::with_capacity(self.atoms.len());
        for (_, chain) in self.chains_iter() {
            for &residue_id in chain.residues() {
                if let Some(residue) = self.residues.get(residue_id) {
                    for &atom_id in residue.atoms() {
                        if let Some(atom) = self.atoms.get(atom_id) {
                            sites.push(AtomSite {
                                chain_id: chain.id,
                                residue_id: residue.id,
                                residue_name: residue.name.clone(),
                                position: atom.position,
                            });
                        }
                    }
                }
            }
        }
        sites
    }
}
