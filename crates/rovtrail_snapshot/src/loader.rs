//! Snapshot loader.

use crate::record::KeyedRecord;
use crate::snapshot::Snapshot;
use rovtrail_core::{CoreError, CoreResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Snapshot loading error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Document is not well-formed JSON
    Parse {
        /// Parser diagnostic
        reason: String,
    },
    /// Top level is not an object
    NotAnObject,
    /// Required top-level collection is absent
    MissingCollection {
        /// The absent key
        key: &'static str,
    },
    /// Top-level collection is not an array
    CollectionNotArray {
        /// The offending key
        key: &'static str,
    },
    /// Collection entry is not an object
    EntryNotObject {
        /// Collection holding the entry
        collection: &'static str,
        /// Position within the collection
        index: usize,
    },
    /// Entry lacks its identifying string field
    MissingKeyField {
        /// Collection holding the entry
        collection: &'static str,
        /// Position within the collection
        index: usize,
        /// The expected field
        field: &'static str,
    },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "not well-formed JSON: {}", reason),
            Self::NotAnObject => write!(f, "top level is not an object"),
            Self::MissingCollection { key } => write!(f, "missing collection {:?}", key),
            Self::CollectionNotArray { key } => write!(f, "collection {:?} is not an array", key),
            Self::EntryNotObject { collection, index } => {
                write!(f, "{}[{}] is not an object", collection, index)
            }
            Self::MissingKeyField {
                collection,
                index,
                field,
            } => write!(
                f,
                "{}[{}] has no string field {:?}",
                collection, index, field
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<SnapshotError> for CoreError {
    fn from(err: SnapshotError) -> Self {
        CoreError::MalformedSnapshot {
            reason: err.to_string(),
        }
    }
}

/// Loads snapshot documents into [`Snapshot`] values.
///
/// Each document is read and parsed exactly once; the resulting snapshot
/// carries both the raw sequences and the key indexes, so the diff engine
/// never goes back to the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Create a new snapshot loader (unit struct)
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load a snapshot from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the document cannot be interpreted.
    pub fn load_str(&self, text: &str) -> Result<Snapshot, SnapshotError> {
        let value: Value = serde_json::from_str(text).map_err(|e| SnapshotError::Parse {
            reason: e.to_string(),
        })?;
        self.load_value(value)
    }

    /// Load a snapshot from an already-parsed JSON value
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when a required collection is absent,
    /// is not an array, or holds an entry without its identifying field.
    pub fn load_value(&self, value: Value) -> Result<Snapshot, SnapshotError> {
        let Value::Object(mut doc) = value else {
            return Err(SnapshotError::NotAnObject);
        };
        let ca_certs = take_collection(&mut doc, "ca_certs", "id")?;
        let roas = take_collection(&mut doc, "roas", "id")?;
        let tals = take_collection(&mut doc, "tals", "name")?;
        Ok(Snapshot::from_collections(ca_certs, roas, tals))
    }

    /// Load a snapshot from a file path
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` when the path is unreadable and
    /// `CoreError::MalformedSnapshot` (naming the path) when the
    /// document cannot be interpreted.
    pub fn load_path(&self, path: &Path) -> CoreResult<Snapshot> {
        let text = fs::read_to_string(path).map_err(|e| CoreError::io(path.display().to_string(), &e))?;
        self.load_str(&text).map_err(|e| CoreError::MalformedSnapshot {
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

fn take_collection(
    doc: &mut serde_json::Map<String, Value>,
    key: &'static str,
    field: &'static str,
) -> Result<Vec<KeyedRecord>, SnapshotError> {
    let value = doc
        .remove(key)
        .ok_or(SnapshotError::MissingCollection { key })?;
    let Value::Array(items) = value else {
        return Err(SnapshotError::CollectionNotArray { key });
    };
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(record) = item else {
            return Err(SnapshotError::EntryNotObject {
                collection: key,
                index,
            });
        };
        let entry_key = match record.get(field).and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => {
                return Err(SnapshotError::MissingKeyField {
                    collection: key,
                    index,
                    field,
                });
            }
        };
        entries.push(KeyedRecord::new(entry_key, record));
    }
    Ok(entries)
}
