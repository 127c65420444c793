//! The reduced result of a change summary run.

use std::collections::{BTreeMap, HashSet};

use apidrift_artifacts::{ArtifactResult, ReportSink};
use apidrift_diff::{
    render_sections, summarize, summary_lines, verbose_report, ChangeRecord, DiffStats,
    FamilySummary, ReportSection,
};
use serde::Serialize;

/// An artifact left out of the report under [`crate::MalformedPolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// All change records of a run, sorted, plus anything that was skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    records: Vec<ChangeRecord>,
    skipped: Vec<SkippedFile>,
}

impl ChangeReport {
    /// Build a report from records already in diff order.
    pub fn new(records: Vec<ChangeRecord>, skipped: Vec<SkippedFile>) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Returns `true` if no key changed in any family.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats::from_records(&self.records)
    }

    /// Families with at least one change, in first-seen order.
    pub fn families(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.family.as_str())
            .filter(|f| seen.insert(*f))
            .collect()
    }

    pub fn summaries(&self) -> BTreeMap<String, FamilySummary> {
        summarize(&self.records)
    }

    /// Concatenated summary lines, one per family.
    pub fn summary_text(&self) -> String {
        summary_lines(&self.records).concat()
    }

    pub fn sections(&self) -> Vec<ReportSection> {
        verbose_report(&self.records)
    }

    /// Verbose sections of every family, rendered.
    pub fn verbose_text(&self) -> String {
        render_sections(&self.sections())
    }

    /// Summary line of `family` followed by its rendered sections, or `None`
    /// if the family has no changes.
    pub fn family_verbose_text(&self, family: &str) -> Option<String> {
        let summary = self.summaries().remove(family)?;
        let sections = self.sections();
        let body = render_sections(sections.iter().filter(|s| s.family == family));
        Some(format!("{}{}", summary.summary_line(), body))
    }

    /// Hand the summary and every family's verbose report to `sink`.
    pub fn write_to(&self, sink: &dyn ReportSink) -> ArtifactResult<()> {
        sink.write_summary(&self.summary_text())?;

        let summaries = self.summaries();
        let sections = self.sections();
        for family in self.families() {
            let Some(summary) = summaries.get(family) else {
                continue;
            };
            let body = render_sections(sections.iter().filter(|s| s.family == family));
            sink.write_verbose(family, &format!("{}{}", summary.summary_line(), body))?;
        }
        Ok(())
    }
}
