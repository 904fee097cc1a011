//! Data structures for representing a single protein structure.
//!
//! The central type is [`structure::StructureModel`], an arena-backed container of
//! chains, residues, and atoms with stable slotmap IDs. External code usually
//! consumes it through the [`provider::StructureProvider`] trait, which is the only
//! surface the engine layer depends on.

pub mod atom;
pub mod chain;
pub mod ids;
pub mod provider;
pub mod residue;
pub mod structure;
