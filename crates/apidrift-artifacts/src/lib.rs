//! Artifact collaborators for apidrift.
//!
//! The diff engine never touches the filesystem itself. This crate supplies
//! the documents to compare, the list of file names to compare, and the
//! destinations the finished changelog is written to.
//!
//! # Sources
//!
//! All sources implement the [`ArtifactSource`] trait. A missing file is a
//! normal state (`Ok(None)`), never an error:
//!
//! - [`DirectorySource`] -- one directory of JSON artifacts on disk
//! - [`InMemorySource`] -- `HashMap`-based source for tests and embedding
//!
//! # Sinks
//!
//! All sinks implement the [`ReportSink`] trait:
//!
//! - [`DirectorySink`] -- summary file plus one `<family>.verbose` per family
//! - [`MemorySink`] -- collects output in memory

pub mod error;
pub mod file_list;
pub mod memory;
pub mod sink;
pub mod source;

pub use error::{ArtifactError, ArtifactResult};
pub use file_list::FileList;
pub use memory::{InMemorySource, MemorySink};
pub use sink::{DirectorySink, ReportSink, DEFAULT_SUMMARY_FILE_NAME, VERBOSE_EXTENSION};
pub use source::{ArtifactSource, DirectorySource};
