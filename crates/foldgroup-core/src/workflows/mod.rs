//! # Workflows Module
//!
//! The highest-level entry points of FoldGroup. Each workflow ties the engine
//! together into one complete batch operation — hashing and grouping a folder of
//! structures, detecting shared target chains, or searching candidates for
//! contacting binders — with progress reporting and cooperative cancellation.
//!
//! Workflows are synchronous; the surrounding application is expected to run
//! them on a background worker so the interactive thread stays responsive.

pub mod group;
pub mod search;
