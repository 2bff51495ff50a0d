//! Delta data model and serialization.

use rovtrail_core::{CoreError, CoreResult};
use rovtrail_snapshot::{Record, TalSet};
use serde::{Deserialize, Serialize};

/// Classification of a change record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Entry present in new only
    Added,
    /// Entry present in old only
    Removed,
    /// Entry present in both with differing content
    Modified,
}

/// A single change to a keyed entry.
///
/// Additions carry an empty `before`, removals an empty `after`,
/// modifications both full records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Entry as it appeared in the older snapshot (`{}` for additions)
    pub before: Record,
    /// Entry as it appears in the newer snapshot (`{}` for removals)
    pub after: Record,
}

impl ChangeRecord {
    /// Record an entry present only in the newer snapshot
    #[must_use]
    pub fn added(after: Record) -> Self {
        Self {
            before: Record::new(),
            after,
        }
    }

    /// Record an entry present only in the older snapshot
    #[must_use]
    pub fn removed(before: Record) -> Self {
        Self {
            before,
            after: Record::new(),
        }
    }

    /// Record an entry whose content changed between snapshots
    #[must_use]
    pub fn modified(before: Record, after: Record) -> Self {
        Self { before, after }
    }

    /// Classify this record
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        if self.before.is_empty() && !self.after.is_empty() {
            ChangeKind::Added
        } else if self.after.is_empty() && !self.before.is_empty() {
            ChangeKind::Removed
        } else {
            ChangeKind::Modified
        }
    }
}

/// TAL verdict: unchanged, or the full before/after TAL sets.
///
/// TALs carry no per-entry granularity; any added, removed, or modified
/// TAL dumps both complete collections. Serialized as `[]` when
/// unchanged and `[before, after]` when changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<TalSet>", try_from = "Vec<TalSet>")]
pub enum TalDiff {
    /// No TAL was added, removed, or modified
    #[default]
    Unchanged,
    /// At least one TAL changed; both full sets are carried
    Changed {
        /// Complete TAL set of the older snapshot
        before: TalSet,
        /// Complete TAL set of the newer snapshot
        after: TalSet,
    },
}

impl TalDiff {
    /// True when any TAL changed
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

impl From<TalDiff> for Vec<TalSet> {
    fn from(diff: TalDiff) -> Self {
        match diff {
            TalDiff::Unchanged => Vec::new(),
            TalDiff::Changed { before, after } => vec![before, after],
        }
    }
}

impl TryFrom<Vec<TalSet>> for TalDiff {
    type Error = String;

    fn try_from(mut sets: Vec<TalSet>) -> Result<Self, Self::Error> {
        match sets.len() {
            0 => Ok(Self::Unchanged),
            2 => {
                let after = sets.pop().expect("two elements");
                let before = sets.pop().expect("two elements");
                Ok(Self::Changed { before, after })
            }
            n => Err(format!("taldiff must hold 0 or 2 TAL sets, got {}", n)),
        }
    }
}

/// Structural difference between two snapshots
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    /// TAL verdict (all-or-nothing)
    pub taldiff: TalDiff,
    /// CA certificate changes: adds/modifies first, then removes
    pub cadiff: Vec<ChangeRecord>,
    /// ROA changes: adds/modifies first, then removes
    pub roadiff: Vec<ChangeRecord>,
}

impl Delta {
    /// True when any collection differs between the snapshots
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.taldiff.is_changed() || !self.cadiff.is_empty() || !self.roadiff.is_empty()
    }

    /// Per-collection change counts
    #[must_use]
    pub fn summary(&self) -> DeltaSummary {
        let (cas_added, cas_removed, cas_modified) = count_kinds(&self.cadiff);
        let (roas_added, roas_removed, roas_modified) = count_kinds(&self.roadiff);
        DeltaSummary {
            cas_added,
            cas_removed,
            cas_modified,
            roas_added,
            roas_removed,
            roas_modified,
            tals_changed: self.taldiff.is_changed(),
        }
    }

    /// Render as pretty-printed JSON (2-space indentation)
    ///
    /// # Errors
    ///
    /// Returns error if encoding fails
    pub fn to_pretty_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Internal {
            message: format!("failed to encode delta: {}", e),
        })
    }

    /// Parse a delta from JSON text
    ///
    /// # Errors
    ///
    /// Returns error if decoding fails
    pub fn from_json(text: &str) -> CoreResult<Self> {
        serde_json::from_str(text).map_err(|e| CoreError::Internal {
            message: format!("failed to decode delta: {}", e),
        })
    }
}

fn count_kinds(records: &[ChangeRecord]) -> (usize, usize, usize) {
    let mut added = 0;
    let mut removed = 0;
    let mut modified = 0;
    for record in records {
        match record.kind() {
            ChangeKind::Added => added += 1,
            ChangeKind::Removed => removed += 1,
            ChangeKind::Modified => modified += 1,
        }
    }
    (added, removed, modified)
}

/// Summary of a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeltaSummary {
    /// CA certificates added
    pub cas_added: usize,
    /// CA certificates removed
    pub cas_removed: usize,
    /// CA certificates modified
    pub cas_modified: usize,
    /// ROAs added
    pub roas_added: usize,
    /// ROAs removed
    pub roas_removed: usize,
    /// ROAs modified
    pub roas_modified: usize,
    /// Whether the TAL set changed
    pub tals_changed: bool,
}

impl std::fmt::Display for DeltaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cas +{} -{} ~{}, roas +{} -{} ~{}, tals {}",
            self.cas_added,
            self.cas_removed,
            self.cas_modified,
            self.roas_added,
            self.roas_removed,
            self.roas_modified,
            if self.tals_changed { "changed" } else { "unchanged" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_change_record_kinds() {
        let entry = record(json!({"id": "A"}));
        assert_eq!(ChangeRecord::added(entry.clone()).kind(), ChangeKind::Added);
        assert_eq!(
            ChangeRecord::removed(entry.clone()).kind(),
            ChangeKind::Removed
        );
        assert_eq!(
            ChangeRecord::modified(entry.clone(), entry).kind(),
            ChangeKind::Modified
        );
    }

    #[test]
    fn test_taldiff_serializes_empty() {
        let json = serde_json::to_value(TalDiff::Unchanged).unwrap();
        assert_eq!(json, json!([]));
    }

    #[test]
    fn test_taldiff_serializes_pair() {
        let mut before = TalSet::new();
        before.insert("T1".to_string(), record(json!({"name": "T1", "v": 1})));
        let mut after = TalSet::new();
        after.insert("T1".to_string(), record(json!({"name": "T1", "v": 2})));
        let diff = TalDiff::Changed { before, after };

        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            json,
            json!([
                {"T1": {"name": "T1", "v": 1}},
                {"T1": {"name": "T1", "v": 2}}
            ])
        );
    }

    #[test]
    fn test_taldiff_roundtrip() {
        let mut before = TalSet::new();
        before.insert("T1".to_string(), record(json!({"name": "T1"})));
        let diff = TalDiff::Changed {
            before: before.clone(),
            after: TalSet::new(),
        };
        let text = serde_json::to_string(&diff).unwrap();
        let parsed: TalDiff = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, diff);

        let parsed: TalDiff = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed, TalDiff::Unchanged);
    }

    #[test]
    fn test_taldiff_rejects_single_set() {
        let result: Result<TalDiff, _> = serde_json::from_str(r#"[{}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_delta_field_order() {
        let text = Delta::default().to_pretty_json().unwrap();
        let taldiff = text.find("\"taldiff\"").unwrap();
        let cadiff = text.find("\"cadiff\"").unwrap();
        let roadiff = text.find("\"roadiff\"").unwrap();
        assert!(taldiff < cadiff);
        assert!(cadiff < roadiff);
    }

    #[test]
    fn test_delta_pretty_uses_two_space_indent() {
        let mut delta = Delta::default();
        delta.cadiff.push(ChangeRecord::added(record(json!({"id": "A"}))));
        let text = delta.to_pretty_json().unwrap();
        assert!(text.contains("\n  \"cadiff\""));
    }

    #[test]
    fn test_delta_summary() {
        let entry = record(json!({"id": "A", "v": 1}));
        let changed = record(json!({"id": "A", "v": 2}));
        let delta = Delta {
            taldiff: TalDiff::Unchanged,
            cadiff: vec![
                ChangeRecord::added(entry.clone()),
                ChangeRecord::modified(entry.clone(), changed),
            ],
            roadiff: vec![ChangeRecord::removed(entry)],
        };
        let summary = delta.summary();
        assert_eq!(summary.cas_added, 1);
        assert_eq!(summary.cas_modified, 1);
        assert_eq!(summary.cas_removed, 0);
        assert_eq!(summary.roas_removed, 1);
        assert!(!summary.tals_changed);
        assert_eq!(
            summary.to_string(),
            "cas +1 -0 ~1, roas +0 -1 ~0, tals unchanged"
        );
    }

    #[test]
    fn test_delta_roundtrip() {
        let entry = record(json!({"id": "A", "v": 1}));
        let delta = Delta {
            taldiff: TalDiff::Unchanged,
            cadiff: vec![ChangeRecord::added(entry)],
            roadiff: Vec::new(),
        };
        let text = delta.to_pretty_json().unwrap();
        let parsed = Delta::from_json(&text).unwrap();
        assert_eq!(parsed, delta);
    }

    #[test]
    fn test_empty_delta_has_no_changes() {
        assert!(!Delta::default().has_changes());
    }
}
