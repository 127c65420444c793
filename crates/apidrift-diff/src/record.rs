//! Change records and the identifiers they carry.

use std::fmt;

use serde::Serialize;

use crate::error::{DiffError, DiffResult};

/// How a single key-path differs between the current and new document.
///
/// The discriminants are part of the ordering contract: within one
/// family and version, deletions sort before additions, which sort before
/// in-place changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ChangeType {
    /// Never produced by a diff; the initial "nothing seen yet" cursor state.
    Unknown = 0,
    /// Present in current, absent in new.
    Deleted = 1,
    /// Absent in current, present in new.
    Added = 2,
    /// Present in both with differing values.
    Changed = 3,
}

impl ChangeType {
    /// Classify a key from its presence on each side.
    ///
    /// Returns `None` when the key is absent on both sides, which is not a
    /// change.
    pub fn classify(in_current: bool, in_new: bool) -> Option<Self> {
        match (in_current, in_new) {
            (true, false) => Some(Self::Deleted),
            (false, true) => Some(Self::Added),
            (true, true) => Some(Self::Changed),
            (false, false) => None,
        }
    }

    /// Numeric code of this change type.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this change makes the family a feature change.
    pub fn is_feature(self) -> bool {
        matches!(self, Self::Deleted | Self::Added)
    }

    /// Whether this change makes the family a breaking change.
    pub fn is_breaking(self) -> bool {
        matches!(self, Self::Deleted)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Deleted => "deleted",
            Self::Added => "added",
            Self::Changed => "changed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(family, version)` pair a document belongs to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocumentId {
    pub family: String,
    pub version: String,
}

impl DocumentId {
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }

    /// Parse `<family>.<version>.<anything>` from an artifact file name.
    ///
    /// Only the first two dot-delimited segments are used; both must be
    /// non-empty.
    pub fn from_file_name(file_name: &str) -> DiffResult<Self> {
        let mut segments = file_name.split('.');
        match (segments.next(), segments.next()) {
            (Some(family), Some(version)) if !family.is_empty() && !version.is_empty() => {
                Ok(Self::new(family, version))
            }
            _ => Err(DiffError::InvalidFileName(file_name.to_string())),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.version)
    }
}

/// One differing key-path within one family and version.
///
/// Field order matters: the derived `Ord` sorts by
/// `(family, version, change_type, key)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChangeRecord {
    pub family: String,
    pub version: String,
    pub change_type: ChangeType,
    pub key: String,
}

impl ChangeRecord {
    pub fn new(id: &DocumentId, key: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            family: id.family.clone(),
            version: id.version.clone(),
            change_type,
            key: key.into(),
        }
    }

    /// Returns `true` if this record belongs to the same family and version
    /// as `other`.
    pub fn same_document(&self, other: &ChangeRecord) -> bool {
        self.family == other.family && self.version == other.version
    }
}
