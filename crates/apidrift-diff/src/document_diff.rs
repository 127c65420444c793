//! Key-level diff between two flattened documents.
//!
//! Every key-path present on either side is compared. Keys matched by the
//! ignore list are skipped before any comparison. A key absent on one side
//! and present on the other is a deletion or an addition; a key present on
//! both sides with different values is a change.

use apidrift_flatten::{flatten_with, FlatDocument, FlattenOptions};
use serde_json::Value;
use tracing::debug;

use crate::error::DiffResult;
use crate::ignore::IgnoreList;
use crate::record::{ChangeRecord, ChangeType, DocumentId};

/// Compute the sorted change records between two flattened documents.
pub fn diff(
    current: &FlatDocument,
    new: &FlatDocument,
    id: &DocumentId,
    ignore: &IgnoreList,
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for key in current.union_keys(new) {
        if ignore.is_ignored(key) {
            continue;
        }

        let before = current.get(key);
        let after = new.get(key);
        if before == after {
            continue;
        }

        if let Some(change_type) = ChangeType::classify(before.is_some(), after.is_some()) {
            records.push(ChangeRecord::new(id, key, change_type));
        }
    }

    sort_records(&mut records);

    debug!(
        family = %id.family,
        version = %id.version,
        records = records.len(),
        "document diff computed"
    );
    records
}

/// Flatten both sides and diff them.
///
/// `None` stands for a document missing on that side. Flattening errors are
/// returned unchanged and no partial result is produced.
pub fn diff_documents(
    current: Option<&Value>,
    new: Option<&Value>,
    id: &DocumentId,
    ignore: &IgnoreList,
    options: &FlattenOptions,
) -> DiffResult<Vec<ChangeRecord>> {
    let current = flatten_with(current, options)?;
    let new = flatten_with(new, options)?;
    Ok(diff(&current, &new, id, ignore))
}

/// Sort records by `(family, version, change_type, key)`.
///
/// Used after concatenating the records of many documents.
pub fn sort_records(records: &mut [ChangeRecord]) {
    records.sort_unstable();
}

/// Per-type record counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub deleted: usize,
    pub added: usize,
    pub changed: usize,
}

impl DiffStats {
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, r| {
            match r.change_type {
                ChangeType::Deleted => stats.deleted += 1,
                ChangeType::Added => stats.added += 1,
                ChangeType::Changed => stats.changed += 1,
                ChangeType::Unknown => {}
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.deleted + self.added + self.changed
    }
}
