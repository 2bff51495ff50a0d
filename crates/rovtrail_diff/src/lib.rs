//! ROVTRAIL Diff Engine
//!
//! Computes the structural delta between two loaded snapshots: per-entry
//! add/remove/modify records for CA certificates and ROAs, and an
//! all-or-nothing changed set for TALs. The computation is a pure
//! transformation over immutable inputs; identical input pairs always
//! yield structurally identical deltas.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delta;
pub mod engine;

// Re-exports
pub use delta::{ChangeKind, ChangeRecord, Delta, DeltaSummary, TalDiff};
pub use engine::DiffEngine;
