//! On-disk snapshot rotation.
//!
//! The monitor keeps three well-known snapshot files in its output
//! directory: the current snapshot, the incoming one being produced by
//! the validator, and an immutable seed copy of the very first capture.

use crate::archive::ArchiveError;
use std::fs;
use std::path::{Path, PathBuf};

const CURRENT_FILE: &str = "rov_current.json";
const INCOMING_FILE: &str = "rov_incoming.json";
const SEED_FILE: &str = "rov_seed.json";
const VALIDATOR_ERR_FILE: &str = "validator.err";

/// Well-known snapshot paths and the promote operation
#[derive(Debug, Clone)]
pub struct SnapshotRotation {
    dir: PathBuf,
}

impl SnapshotRotation {
    /// Set up rotation under `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ArchiveError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the rotated files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the current snapshot
    #[must_use]
    pub fn current(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    /// Path the validator writes the fresh snapshot to
    #[must_use]
    pub fn incoming(&self) -> PathBuf {
        self.dir.join(INCOMING_FILE)
    }

    /// Path of the immutable first-capture copy
    #[must_use]
    pub fn seed(&self) -> PathBuf {
        self.dir.join(SEED_FILE)
    }

    /// Path the validator's stderr is captured to
    #[must_use]
    pub fn validator_err(&self) -> PathBuf {
        self.dir.join(VALIDATOR_ERR_FILE)
    }

    /// True when a current snapshot exists on disk
    #[must_use]
    pub fn has_current(&self) -> bool {
        self.current().is_file()
    }

    /// Promote the incoming snapshot to current (atomic rename)
    ///
    /// # Errors
    ///
    /// Returns error if the rename fails
    pub fn promote(&self) -> Result<(), ArchiveError> {
        let incoming = self.incoming();
        let current = self.current();
        fs::rename(&incoming, &current).map_err(|e| ArchiveError::Io {
            path: incoming.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Copy the current snapshot to the seed path, once.
    ///
    /// A seed that already exists is left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the copy fails
    pub fn seed_from_current(&self) -> Result<(), ArchiveError> {
        let seed = self.seed();
        if seed.is_file() {
            return Ok(());
        }
        let current = self.current();
        fs::copy(&current, &seed)
            .map(|_| ())
            .map_err(|e| ArchiveError::Io {
                path: current.display().to_string(),
                reason: e.to_string(),
            })
    }
}
