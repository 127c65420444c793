//! Verbose per-key change report.
//!
//! Built in one linear pass over records already in diff order. A new
//! section starts whenever `(family, version)` changes and a new key group
//! starts whenever the change type changes within a section.

use std::fmt;

use serde::Serialize;

use crate::record::{ChangeRecord, ChangeType};

/// A run of keys sharing one change type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyGroup {
    pub change_type: ChangeType,
    pub keys: Vec<String>,
}

impl KeyGroup {
    /// Label line introducing this group.
    pub fn label(&self) -> String {
        format!("The following keys were {}:", self.change_type)
    }
}

/// All key groups for one `(family, version)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub family: String,
    pub version: String,
    pub groups: Vec<KeyGroup>,
}

impl ReportSection {
    /// Section header, `#### <family>:<version>`.
    pub fn header(&self) -> String {
        format!("#### {}:{}", self.family, self.version)
    }

    /// Total number of keys across all groups.
    pub fn key_count(&self) -> usize {
        self.groups.iter().map(|g| g.keys.len()).sum()
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\n{}\n\n", self.header())?;
        for group in &self.groups {
            writeln!(f, "\n{}", group.label())?;
            for key in &group.keys {
                writeln!(f, "- {key}")?;
            }
        }
        Ok(())
    }
}

/// Group ordered records into report sections.
///
/// Records must already be in diff order; nothing is re-sorted.
pub fn verbose_report(records: &[ChangeRecord]) -> Vec<ReportSection> {
    let mut sections: Vec<ReportSection> = Vec::new();
    let mut last_document: Option<&ChangeRecord> = None;
    let mut last_type = ChangeType::Unknown;

    for record in records {
        let same_document = last_document.is_some_and(|last| last.same_document(record));
        if !same_document {
            sections.push(ReportSection {
                family: record.family.clone(),
                version: record.version.clone(),
                groups: Vec::new(),
            });
            last_document = Some(record);
            last_type = ChangeType::Unknown;
        }

        let Some(section) = sections.last_mut() else {
            continue;
        };

        if record.change_type != last_type {
            section.groups.push(KeyGroup {
                change_type: record.change_type,
                keys: Vec::new(),
            });
            last_type = record.change_type;
        }

        if let Some(group) = section.groups.last_mut() {
            group.keys.push(record.key.clone());
        }
    }

    sections
}

/// Render one section in changelog form.
pub fn render_section(section: &ReportSection) -> String {
    section.to_string()
}

/// Render sections back to back. Every section opens with a blank line.
pub fn render_sections<'a, I>(sections: I) -> String
where
    I: IntoIterator<Item = &'a ReportSection>,
{
    sections.into_iter().map(render_section).collect()
}
