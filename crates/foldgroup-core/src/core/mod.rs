//! # Core Module
//!
//! This module provides the fundamental building blocks for structural grouping and
//! contact analysis in FoldGroup, serving as the stateless foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the data structures and pure algorithms the engine layer
//! is built on. Nothing here holds cross-structure state: a `StructureModel` describes
//! one structure, and the sequence-key functions are deterministic digests over the
//! data a provider exposes.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains, the
//!   arena-backed `StructureModel`, and the `StructureProvider` trait that external
//!   loaders implement
//! - **Sequence Identity** ([`sequence`]) - Residue-code tables and the canonical
//!   truncated-digest sequence keys used for exact-match grouping

pub mod models;
pub mod sequence;
