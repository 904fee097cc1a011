use nalgebra::Point3;

/// One entry of a structure's ordered per-residue sequence.
///
/// The order of these records is the file order of the source structure;
/// the sequence-key algorithm depends on it being stable per chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceResidue {
    /// Single-character chain identifier.
    pub chain_id: char,
    /// Residue sequence number from the source file.
    pub residue_id: isize,
    /// One-letter amino-acid code ('X' for non-standard residues).
    pub code: char,
}

/// One raw atom record as exposed by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSite {
    /// Single-character chain identifier.
    pub chain_id: char,
    /// Residue sequence number the atom belongs to.
    pub residue_id: isize,
    /// Three-letter residue name (e.g., "ALA").
    pub residue_name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

/// Defines the interface the engine uses to query a loaded structure.
///
/// This trait is the seam between the grouping/contact engine and whatever
/// loads structure files. The engine holds providers as reference-counted
/// handles and never takes ownership of the underlying structure; the
/// external owner decides when a structure is evicted.
///
/// Implementors must return sequence records in file order — the canonical
/// sequence key is insensitive to chain *ordering* but not to the residue
/// order within a chain.
pub trait StructureProvider: Send + Sync {
    /// Returns the ordered per-residue sequence of the whole structure.
    fn sequence_residues(&self) -> Vec<SequenceResidue>;

    /// Returns the distinct chain identifiers, in file order.
    fn chain_ids(&self) -> Vec<char>;

    /// Returns the total number of residues in the structure.
    fn residue_count(&self) -> usize;

    /// Returns every atom record of the structure.
    fn atom_sites(&self) -> Vec<AtomSite>;

    /// Returns the atom records belonging to any of the given chains.
    fn atom_sites_in_chains(&self, chains: &[char]) -> Vec<AtomSite> {
        self.atom_sites()
            .into_iter()
            .filter(|site| chains.contains(&site.chain_id))
            .collect()
    }

    /// Returns the atom records of one residue, identified by chain and
    /// residue sequence number.
    fn atom_sites_of_residue(&self, chain_id: char, residue_id: isize) -> Vec<AtomSite> {
        self.atom_sites()
            .into_iter()
            .filter(|site| site.chain_id == chain_id && site.residue_id == residue_id)
            .collect()
    }
}
