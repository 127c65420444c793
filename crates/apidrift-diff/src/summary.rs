//! Per-family feature/breaking classification and commit-style summary lines.
//!
//! A family is a feature change if any of its records is an addition or a
//! deletion, and a breaking change if any of its records is a deletion.
//! A single deleted key anywhere in any version marks the whole family.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::record::ChangeRecord;

/// Aggregated classification of one family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FamilySummary {
    pub family: String,
    pub is_feature: bool,
    pub is_breaking: bool,
}

impl FamilySummary {
    fn empty(family: &str) -> Self {
        Self {
            family: family.to_string(),
            is_feature: false,
            is_breaking: false,
        }
    }

    fn absorb(&mut self, record: &ChangeRecord) {
        self.is_feature |= record.change_type.is_feature();
        self.is_breaking |= record.change_type.is_breaking();
    }

    /// `feat` for feature changes, `fix` otherwise.
    pub fn commit_type(&self) -> &'static str {
        if self.is_feature {
            "feat"
        } else {
            "fix"
        }
    }

    /// `<family>(<commit type>)<!>: update the api\n`
    pub fn summary_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FamilySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.is_breaking { "!" } else { "" };
        writeln!(f, "{}({}){}: update the api", self.family, self.commit_type(), bang)
    }
}

/// Group records by family and classify each family.
///
/// Families with no records do not appear in the result.
pub fn summarize(records: &[ChangeRecord]) -> BTreeMap<String, FamilySummary> {
    let mut summaries: BTreeMap<String, FamilySummary> = BTreeMap::new();
    for record in records {
        summaries
            .entry(record.family.clone())
            .or_insert_with(|| FamilySummary::empty(&record.family))
            .absorb(record);
    }
    summaries
}

/// One summary line per family, in the order families first appear in
/// `records`.
pub fn summary_lines(records: &[ChangeRecord]) -> Vec<String> {
    let summaries = summarize(records);
    let mut seen = HashSet::new();

    records
        .iter()
        .filter(|r| seen.insert(r.family.as_str()))
        .filter_map(|r| summaries.get(&r.family))
        .map(FamilySummary::summary_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ChangeType, DocumentId};

    fn record(family: &str, version: &str, key: &str, change_type: ChangeType) -> ChangeRecord {
        ChangeRecord::new(&DocumentId::new(family, version), key, change_type)
    }

    #[test]
    fn deleted_key_is_breaking_feature() {
        let records = vec![
            record("foo", "v1", "a", ChangeType::Deleted),
            record("foo", "v1", "b", ChangeType::Changed),
            record("foo", "v1", "c", ChangeType::Changed),
        ];
        let summary = &summarize(&records)["foo"];

        assert!(summary.is_feature);
        assert!(summary.is_breaking);
        assert_eq!(summary.summary_line(), "foo(feat)!: update the api\n");
    }

    #[test]
    fn only_changed_keys_is_fix() {
        let records = vec![
            record("foo", "v1", "a", ChangeType::Changed),
            record("foo", "v2", "b", ChangeType::Changed),
        ];
        let summary = &summarize(&records)["foo"];

        assert!(!summary.is_feature);
        assert!(!summary.is_breaking);
        assert_eq!(summary.summary_line(), "foo(fix): update the api\n");
    }

    #[test]
    fn added_key_is_non_breaking_feature() {
        let records = vec![
            record("foo", "v1", "x", ChangeType::Added),
            record("foo", "v1", "y", ChangeType::Changed),
        ];
        assert_eq!(
            summarize(&records)["foo"].summary_line(),
            "foo(feat): update the api\n"
        );
    }

    #[test]
    fn deletion_in_one_version_marks_whole_family() {
        let records = vec![
            record("drive", "v2", "a", ChangeType::Changed),
            record("drive", "v3", "b", ChangeType::Deleted),
        ];
        let summary = &summarize(&records)["drive"];
        assert!(summary.is_breaking);
    }

    #[test]
    fn families_are_independent() {
        let records = vec![
            record("bar", "v1", "a", ChangeType::Changed),
            record("foo", "v1", "b", ChangeType::Deleted),
        ];
        let summaries = summarize(&records);

        assert_eq!(summaries.len(), 2);
        assert!(!summaries["bar"].is_breaking);
        assert!(summaries["foo"].is_breaking);
    }

    #[test]
    fn no_records_no_summaries() {
        assert!(summarize(&[]).is_empty());
        assert!(summary_lines(&[]).is_empty());
    }

    #[test]
    fn summary_lines_unique_in_first_seen_order() {
        let records = vec![
            record("zeta", "v1", "a", ChangeType::Changed),
            record("alpha", "v1", "a", ChangeType::Added),
            record("zeta", "v2", "b", ChangeType::Deleted),
        ];
        assert_eq!(
            summary_lines(&records),
            vec![
                "zeta(feat)!: update the api\n".to_string(),
                "alpha(feat): update the api\n".to_string(),
            ]
        );
    }
}
