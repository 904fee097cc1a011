use crate::core::models::provider::SequenceResidue;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Number of hexadecimal characters kept from the digest.
///
/// 48 bits of a cryptographic digest; the collision risk over a few thousand
/// structures is negligible at this scale.
pub const KEY_LENGTH: usize = 12;

/// Computes the canonical sequence key of a whole structure.
///
/// Residues are grouped by chain (preserving per-chain file order), chains are
/// sorted lexicographically by identifier, each chain contributes a
/// `chain:sequence` part, the parts are joined with `|`, and the first
/// [`KEY_LENGTH`] hex characters of the SHA-256 digest become the key.
///
/// The key is therefore independent of the order chains appear in the file,
/// but sensitive to sequence content, chain identity, and chain count.
///
/// # Return
///
/// Returns `None` when the record list is empty.
pub fn sequence_key(residues: &[SequenceResidue]) -> Option<String> {
    key_over_chains(residues, None)
}

/// Computes the sequence key restricted to a subset of chains.
///
/// This is the same algorithm as [`sequence_key`] applied to the records whose
/// chain is in `chains`; it produces the target and binder keys used for
/// target grouping and binder sub-grouping.
///
/// # Return
///
/// Returns `None` when no record belongs to any of the given chains.
pub fn sequence_key_for_chains(residues: &[SequenceResidue], chains: &[char]) -> Option<String> {
    key_over_chains(residues, Some(chains))
}

/// Computes the single-chain key used by the chain sequence index.
///
/// Consistent with [`sequence_key_for_chains`] restricted to one chain.
pub fn chain_sequence_key(chain_id: char, sequence: &str) -> String {
    truncated_digest(&format!("{}:{}", chain_id, sequence))
}

fn key_over_chains(residues: &[SequenceResidue], filter: Option<&[char]>) -> Option<String> {
    let mut sequences: HashMap<char, String> = HashMap::new();
    for record in residues {
        if let Some(chains) = filter {
            if !chains.contains(&record.chain_id) {
                continue;
            }
        }
        sequences.entry(record.chain_id).or_default().push(record.code);
    }

    if sequences.is_empty() {
        return None;
    }

    let mut parts: Vec<(char, String)> = sequences.into_iter().collect();
    parts.sort_by_key(|(chain_id, _)| *chain_id);

    let joined = parts
        .iter()
        .map(|(chain_id, sequence)| format!("{}:{}", chain_id, sequence))
        .collect::<Vec<_>>()
        .join("|");

    Some(truncated_digest(&joined))
}

fn truncated_digest(input: &str) -> String {
    let mut key = hex::encode(Sha256::digest(input.as_bytes()));
    key.truncate(KEY_LENGTH);
    key
}
