//! Difference engine for apidrift.
//!
//! Compares two flattened versions of an API description document and turns
//! the differing key-paths into typed change records, then reduces those
//! records into one commit-style summary line per family and a grouped,
//! human-readable verbose report.
//!
//! # Key Types
//!
//! - [`ChangeRecord`] / [`ChangeType`] -- one differing key-path
//! - [`DocumentId`] -- `(family, version)` parsed from an artifact file name
//! - [`IgnoreList`] -- case-insensitive key-path exclusions
//! - [`FamilySummary`] -- feature/breaking classification per family
//! - [`ReportSection`] / [`KeyGroup`] -- verbose report structure
//!
//! # Ordering
//!
//! Records are always ordered by `(family, version, change_type, key)`.
//! Summaries and reports are single linear passes over that order and never
//! re-sort.

pub mod document_diff;
pub mod error;
pub mod ignore;
pub mod record;
pub mod report;
pub mod summary;

pub use document_diff::{diff, diff_documents, sort_records, DiffStats};
pub use error::{DiffError, DiffResult};
pub use ignore::IgnoreList;
pub use record::{ChangeRecord, ChangeType, DocumentId};
pub use report::{render_section, render_sections, verbose_report, KeyGroup, ReportSection};
pub use summary::{summarize, summary_lines, FamilySummary};
