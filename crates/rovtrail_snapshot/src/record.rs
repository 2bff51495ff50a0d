//! Opaque snapshot entries and their identifying keys.

use serde::{Deserialize, Serialize};

/// A single snapshot entry - arbitrary nested key/value data.
///
/// The engine never interprets an entry beyond its identifying field;
/// comparison is full structural equality over the whole record.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// An entry paired with its extracted identifying key.
///
/// The loader extracts the key once, so downstream code never has to
/// re-derive it (or handle its absence) from the raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRecord {
    /// Identifying key (`id` for CA certificates and ROAs, `name` for TALs)
    pub key: String,
    /// The full entry
    pub record: Record,
}

impl KeyedRecord {
    /// Create a keyed record
    #[must_use]
    pub fn new(key: String, record: Record) -> Self {
        Self { key, record }
    }
}
