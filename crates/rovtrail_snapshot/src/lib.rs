//! ROVTRAIL Snapshot Loading
//!
//! Parses a validator snapshot document (CA certificates, ROAs, TALs)
//! into keyed mappings plus the raw ordered sequences the diff engine
//! walks. Entries stay structurally opaque; only the identifying field
//! is interpreted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod loader;
pub mod record;
pub mod snapshot;

// Re-exports
pub use loader::{SnapshotError, SnapshotLoader};
pub use record::{KeyedRecord, Record};
pub use snapshot::{Snapshot, TalSet};
