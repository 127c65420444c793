//! Change summary orchestration for apidrift.
//!
//! Compares every listed artifact between a current and a new snapshot,
//! fanning the per-artifact diffs out over a bounded pool of blocking
//! workers, then reduces the concatenated change records into a
//! [`ChangeReport`]: one summary line per family plus verbose per-key
//! sections.
//!
//! # Cancellation
//!
//! [`ChangeSummary::detect_changes`] owns all in-flight work. Dropping the
//! future stops further submissions and discards any finished but
//! unconsumed results; nothing is written until the caller hands the report
//! to a sink.

pub mod config;
pub mod error;
pub mod report;
pub mod summary;

pub use config::{IgnoreMode, MalformedPolicy, SummaryConfig};
pub use error::{SummaryError, SummaryResult};
pub use report::{ChangeReport, SkippedFile};
pub use summary::{compare_file, ChangeSummary};
