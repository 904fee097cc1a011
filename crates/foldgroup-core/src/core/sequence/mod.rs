//! Sequence identity: residue-code tables and content-addressed sequence keys.
//!
//! Everything here is pure and deterministic. The same structure content always
//! produces the same key, regardless of the order its chains appear in the file.

pub mod codes;
pub mod hash;
