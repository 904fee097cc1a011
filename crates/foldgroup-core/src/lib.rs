//! # FoldGroup Core Library
//!
//! A structural grouping and spatial contact engine for browsing large batches of
//! predicted protein structures: content-addressed sequence hashing and caching,
//! exact-sequence and target/binder grouping, and distance-based interface queries
//! backed by spatial indexing.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`StructureModel`,
//!   the `StructureProvider` seam) and pure algorithms (residue-code tables, the
//!   canonical sequence-key digest).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer holds the grouping machinery:
//!   the disk-backed `SequenceHashCache`, the inverted `ChainSequenceIndex`, the
//!   `TargetDesignationStore`, the spatial contact queries, and the `GroupingManager`
//!   that orchestrates them.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `engine` and `core` together into complete batch operations — folder-scale
//!   sequence grouping, target auto-detection, multi-structure binder search — with
//!   progress reporting and cooperative cancellation.

pub mod core;
pub mod engine;
pub mod workflows;
