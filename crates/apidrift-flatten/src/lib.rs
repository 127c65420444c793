//! Document flattener for apidrift.
//!
//! Turns one semi-structured API description document into a flat mapping
//! from dotted key-path to scalar value, the unit of comparison used by the
//! difference engine.
//!
//! # Key Types
//!
//! - [`FlatDocument`] -- ordered `key-path -> value` map, immutable once built
//! - [`FlattenOptions`] -- traversal limits
//! - [`FlattenError`] -- malformed or pathologically nested input

pub mod document;
pub mod error;
pub mod flatten;

pub use document::FlatDocument;
pub use error::{FlattenError, FlattenResult};
pub use flatten::{flatten, flatten_with, parse_document, FlattenOptions, DEFAULT_MAX_DEPTH};
