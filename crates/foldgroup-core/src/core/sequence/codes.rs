use phf::{Map, phf_map};

/// One-letter code reported for residues not present in the table.
pub const UNKNOWN_RESIDUE_CODE: char = 'X';

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Common variants seen in prediction output and force-field conventions.
    "MSE" => 'M',
    "HSD" => 'H', "HSE" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "CYX" => 'C',
    "SEC" => 'U', "PYL" => 'O',
};

/// Returns the one-letter code for a three-letter residue name.
///
/// Unknown names map to [`UNKNOWN_RESIDUE_CODE`] rather than failing, so
/// non-standard residues survive sequence hashing and interface reports.
pub fn one_letter_code(residue_name: &str) -> char {
    THREE_TO_ONE
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_RESIDUE_CODE)
}

/// Returns true if the residue name is a standard amino acid (or a variant
/// of one, such as MSE or a histidine protonation state).
///
/// Contact detection filters atoms through this predicate so waters, ions,
/// and ligands never enter a spatial index.
pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    THREE_TO_ONE.contains_key(residue_name.trim().to_ascii_uppercase().as_str())
}
