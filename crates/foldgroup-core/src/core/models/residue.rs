use super::ids::{AtomId, ChainId};

/// Represents a residue within a chain.
///
/// Atoms are kept in insertion order, which matches file order for structures
/// built by a parser. The residue keeps the sequence number from the source
/// file (`id`), which is what contact queries report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue sequence number from the source file.
    pub id: isize,
    /// Name of the residue (e.g., "ALA", "GLY").
    pub name: String,
    /// ID of the parent chain.
    pub chain_id: ChainId,
    /// IDs of atoms belonging to this residue, in insertion order.
    pub(crate) atoms: Vec<AtomId>,
}

impl Residue {
    pub(crate) fn new(id: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            id,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}
