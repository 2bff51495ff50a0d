//! Loaded snapshot with keyed mappings over the raw sequences.

use crate::record::{KeyedRecord, Record};
use indexmap::IndexMap;

/// Full TAL collection keyed by name
pub type TalSet = IndexMap<String, Record>;

/// A loaded snapshot: three ordered collections plus key indexes.
///
/// Read-only after load. Indexes map a key to a position in the raw
/// sequence; on duplicate keys within one snapshot the last-seen entry
/// wins (the index is overwritten, the raw sequence keeps every entry).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    ca_certs: Vec<KeyedRecord>,
    roas: Vec<KeyedRecord>,
    tals: Vec<KeyedRecord>,
    ca_by_id: IndexMap<String, usize>,
    roa_by_id: IndexMap<String, usize>,
    tal_by_name: IndexMap<String, usize>,
}

impl Snapshot {
    /// Build a snapshot from already-keyed collections
    #[must_use]
    pub fn from_collections(
        ca_certs: Vec<KeyedRecord>,
        roas: Vec<KeyedRecord>,
        tals: Vec<KeyedRecord>,
    ) -> Self {
        let ca_by_id = index_by_key(&ca_certs);
        let roa_by_id = index_by_key(&roas);
        let tal_by_name = index_by_key(&tals);
        Self {
            ca_certs,
            roas,
            tals,
            ca_by_id,
            roa_by_id,
            tal_by_name,
        }
    }

    /// Raw CA certificate sequence, in document order
    #[must_use]
    pub fn ca_certs(&self) -> &[KeyedRecord] {
        &self.ca_certs
    }

    /// Raw ROA sequence, in document order
    #[must_use]
    pub fn roas(&self) -> &[KeyedRecord] {
        &self.roas
    }

    /// Raw TAL sequence, in document order
    #[must_use]
    pub fn tals(&self) -> &[KeyedRecord] {
        &self.tals
    }

    /// Look up a CA certificate by id
    #[must_use]
    pub fn ca(&self, id: &str) -> Option<&Record> {
        self.ca_by_id.get(id).map(|&i| &self.ca_certs[i].record)
    }

    /// Look up a ROA by id
    #[must_use]
    pub fn roa(&self, id: &str) -> Option<&Record> {
        self.roa_by_id.get(id).map(|&i| &self.roas[i].record)
    }

    /// Look up a TAL by name
    #[must_use]
    pub fn tal(&self, name: &str) -> Option<&Record> {
        self.tal_by_name.get(name).map(|&i| &self.tals[i].record)
    }

    /// Full TAL collection keyed by name (last-seen entry per name)
    #[must_use]
    pub fn tal_set(&self) -> TalSet {
        self.tal_by_name
            .iter()
            .map(|(name, &i)| (name.clone(), self.tals[i].record.clone()))
            .collect()
    }

    /// True when all three collections are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ca_certs.is_empty() && self.roas.is_empty() && self.tals.is_empty()
    }
}

fn index_by_key(entries: &[KeyedRecord]) -> IndexMap<String, usize> {
    let mut index = IndexMap::new();
    for (i, entry) in entries.iter().enumerate() {
        // last-seen entry wins on duplicate keys
        index.insert(entry.key.clone(), i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(key: &str, value: serde_json::Value) -> KeyedRecord {
        match value {
            serde_json::Value::Object(map) => KeyedRecord::new(key.to_string(), map),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = Snapshot::from_collections(Vec::new(), Vec::new(), Vec::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.ca("A").is_none());
        assert!(snapshot.tal_set().is_empty());
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = Snapshot::from_collections(
            vec![keyed("A", json!({"id": "A", "v": 1}))],
            vec![keyed("R1", json!({"id": "R1", "asn": 64496}))],
            vec![keyed("T1", json!({"name": "T1", "uri": "rsync://tal"}))],
        );
        assert_eq!(snapshot.ca_certs().len(), 1);
        assert_eq!(
            snapshot.ca("A").and_then(|r| r.get("v")),
            Some(&json!(1))
        );
        assert_eq!(
            snapshot.roa("R1").and_then(|r| r.get("asn")),
            Some(&json!(64496))
        );
        assert!(snapshot.tal("T1").is_some());
        assert!(snapshot.tal("T2").is_none());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let snapshot = Snapshot::from_collections(
            vec![
                keyed("A", json!({"id": "A", "v": 1})),
                keyed("A", json!({"id": "A", "v": 2})),
            ],
            Vec::new(),
            Vec::new(),
        );
        // raw sequence keeps both entries, lookup sees the last
        assert_eq!(snapshot.ca_certs().len(), 2);
        assert_eq!(
            snapshot.ca("A").and_then(|r| r.get("v")),
            Some(&json!(2))
        );
    }

    #[test]
    fn test_tal_set_order_and_shadowing() {
        let snapshot = Snapshot::from_collections(
            Vec::new(),
            Vec::new(),
            vec![
                keyed("T1", json!({"name": "T1", "v": 1})),
                keyed("T2", json!({"name": "T2", "v": 1})),
                keyed("T1", json!({"name": "T1", "v": 2})),
            ],
        );
        let set = snapshot.tal_set();
        let names: Vec<&String> = set.keys().collect();
        assert_eq!(names, ["T1", "T2"]);
        assert_eq!(set["T1"].get("v"), Some(&json!(2)));
    }
}
