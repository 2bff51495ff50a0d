//! Diff engine for comparing snapshots.

use crate::delta::{ChangeRecord, Delta, TalDiff};
use rovtrail_snapshot::{KeyedRecord, Record, Snapshot};

/// Engine for diffing two snapshots.
///
/// Stateless and pure: both inputs are read-only, the output is built
/// once per invocation, and the same input pair always produces a
/// structurally identical delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine;

impl DiffEngine {
    /// Create a new diff engine (unit struct)
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the delta from `old` to `new`.
    ///
    /// Two passes per collection: the forward pass walks the new
    /// sequence and emits additions and modifications in new-list
    /// order, the backward pass walks the old sequence and emits
    /// removals in old-list order. An entry present in both snapshots
    /// with differing content is reported exactly once, as modified.
    #[must_use]
    pub fn diff(&self, old: &Snapshot, new: &Snapshot) -> Delta {
        let cadiff = diff_records(old.ca_certs(), new.ca_certs(), |k| old.ca(k), |k| new.ca(k));
        let roadiff = diff_records(old.roas(), new.roas(), |k| old.roa(k), |k| new.roa(k));
        let taldiff = if tals_changed(old, new) {
            TalDiff::Changed {
                before: old.tal_set(),
                after: new.tal_set(),
            }
        } else {
            TalDiff::Unchanged
        };
        Delta {
            taldiff,
            cadiff,
            roadiff,
        }
    }
}

fn diff_records<'a, F, G>(
    old_list: &[KeyedRecord],
    new_list: &[KeyedRecord],
    old_lookup: F,
    new_lookup: G,
) -> Vec<ChangeRecord>
where
    F: Fn(&str) -> Option<&'a Record>,
    G: Fn(&str) -> Option<&'a Record>,
{
    let mut changes = Vec::new();
    for entry in new_list {
        match old_lookup(&entry.key) {
            None => changes.push(ChangeRecord::added(entry.record.clone())),
            Some(prev) if *prev != entry.record => {
                changes.push(ChangeRecord::modified(prev.clone(), entry.record.clone()));
            }
            Some(_) => {}
        }
    }
    for entry in old_list {
        if new_lookup(&entry.key).is_none() {
            changes.push(ChangeRecord::removed(entry.record.clone()));
        }
    }
    changes
}

fn tals_changed(old: &Snapshot, new: &Snapshot) -> bool {
    let forward = new.tals().iter().any(|entry| match old.tal(&entry.key) {
        None => true,
        Some(prev) => *prev != entry.record,
    });
    if forward {
        return true;
    }
    old.tals().iter().any(|entry| match new.tal(&entry.key) {
        None => true,
        Some(current) => *current != entry.record,
    })
}
