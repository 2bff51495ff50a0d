//! Timestamped delta records on disk.

use rovtrail_core::{CoreError, Timestamp};
use rovtrail_diff::Delta;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const DELTA_PREFIX: &str = "delta_";
const DELTA_SUFFIX: &str = ".json";

/// Archive error
#[derive(Debug)]
pub enum ArchiveError {
    /// Filesystem operation failed
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying reason
        reason: String,
    },
    /// Delta could not be encoded
    Encode {
        /// Underlying reason
        reason: String,
    },
    /// Archived record could not be decoded
    Decode {
        /// Path of the unreadable record
        path: String,
        /// Underlying reason
        reason: String,
    },
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "IO failure on {}: {}", path, reason),
            Self::Encode { reason } => write!(f, "failed to encode delta: {}", reason),
            Self::Decode { path, reason } => {
                write!(f, "failed to decode archived delta {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<ArchiveError> for CoreError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Io { path, reason } => CoreError::Io { path, reason },
            other => CoreError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// A single archived delta record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the record on disk
    pub path: PathBuf,
    /// Capture timestamp parsed from the file name
    pub timestamp: Timestamp,
}

/// Append-only archive of timestamped delta records.
///
/// Records are named `delta_<unix-seconds>.json`; a second capture in
/// the same second replaces the first. Writes go through a temp file in
/// the archive directory and a rename, so a record is never visible
/// half-written.
#[derive(Debug, Clone)]
pub struct DeltaArchive {
    root: PathBuf,
}

impl DeltaArchive {
    /// Open an archive rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ArchiveError::Io {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Archive root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a delta captured at `at`
    ///
    /// # Errors
    ///
    /// Returns error if encoding or the filesystem write fails; on
    /// failure no record file is left behind.
    pub fn write(&self, delta: &Delta, at: Timestamp) -> Result<PathBuf, ArchiveError> {
        let text = delta.to_pretty_json().map_err(|e| ArchiveError::Encode {
            reason: e.to_string(),
        })?;
        let path = self.record_path(at);

        let mut temp =
            tempfile::NamedTempFile::new_in(&self.root).map_err(|e| ArchiveError::Io {
                path: self.root.display().to_string(),
                reason: e.to_string(),
            })?;
        temp.write_all(text.as_bytes())
            .and_then(|()| temp.write_all(b"\n"))
            .map_err(|e| ArchiveError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        temp.persist(&path).map_err(|e| ArchiveError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "delta archived");
        Ok(path)
    }

    /// Read an archived record back
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable or not a delta
    pub fn read(&self, path: &Path) -> Result<Delta, ArchiveError> {
        let text = fs::read_to_string(path).map_err(|e| ArchiveError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Delta::from_json(&text).map_err(|e| ArchiveError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// All archived records, oldest first
    ///
    /// # Errors
    ///
    /// Returns error if the archive directory cannot be read
    pub fn list(&self) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut entries = Vec::new();
        let dir = fs::read_dir(&self.root).map_err(|e| ArchiveError::Io {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })?;
        for item in dir {
            let item = item.map_err(|e| ArchiveError::Io {
                path: self.root.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = item.path();
            if let Some(timestamp) = record_timestamp(&path) {
                entries.push(ArchiveEntry { path, timestamp });
            }
        }
        entries.sort_by_key(|entry| entry.timestamp);
        Ok(entries)
    }

    /// Most recent archived record, if any
    ///
    /// # Errors
    ///
    /// Returns error if the archive directory cannot be read
    pub fn latest(&self) -> Result<Option<ArchiveEntry>, ArchiveError> {
        Ok(self.list()?.pop())
    }

    fn record_path(&self, at: Timestamp) -> PathBuf {
        self.root
            .join(format!("{}{}{}", DELTA_PREFIX, at.as_secs(), DELTA_SUFFIX))
    }
}

fn record_timestamp(path: &Path) -> Option<Timestamp> {
    let name = path.file_name()?.to_str()?;
    let seconds = name
        .strip_prefix(DELTA_PREFIX)?
        .strip_suffix(DELTA_SUFFIX)?
        .parse::<u64>()
        .ok()?;
    Some(Timestamp::from_secs(seconds))
}
