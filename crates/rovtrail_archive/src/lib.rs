//! ROVTRAIL Delta Archive
//!
//! Persists each computed delta as a timestamped record and manages the
//! on-disk snapshot rotation (current/incoming/seed) the monitor drives.
//! Writes are atomic: a record is either fully on disk or absent.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod rotation;

// Re-exports
pub use archive::{ArchiveEntry, ArchiveError, DeltaArchive};
pub use rotation::SnapshotRotation;
