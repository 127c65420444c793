//! The ordered list of artifact file names to compare.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{ArtifactError, ArtifactResult};
use crate::source::ArtifactSource;

/// Ordered artifact file names. Each name encodes
/// `<family>.<version>.<anything>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileList {
    names: Vec<String>,
}

impl FileList {
    /// Use the given names as-is, keeping only their last path component.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|n| base_name(n.as_ref()))
            .collect();
        Self { names }
    }

    /// Read a newline-separated list of changed paths.
    ///
    /// Blank lines are skipped and only the part after the last `/` is kept,
    /// so `discovery/drive.v3.json` becomes `drive.v3.json`.
    pub fn from_changed_files(path: &Path) -> ArtifactResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
        Ok(Self::from_names(text.lines()))
    }

    /// Every artifact present in either snapshot, deduplicated and sorted.
    pub fn from_sources(current: &dyn ArtifactSource, new: &dyn ArtifactSource) -> ArtifactResult<Self> {
        let mut names = BTreeSet::new();
        names.extend(current.list()?);
        names.extend(new.list()?);
        Ok(Self {
            names: names.into_iter().collect(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

fn base_name(line: &str) -> Option<String> {
    let line = line.trim();
    let name = line.rsplit('/').next().unwrap_or(line);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySource;
    use serde_json::json;

    #[test]
    fn names_keep_last_component() {
        let list = FileList::from_names(["discovery/drive.v3.json", "foo.v1.json", "  ", "a/b/"]);
        assert_eq!(list.names(), ["drive.v3.json", "foo.v1.json"]);
    }

    #[test]
    fn changed_files_skip_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changed_files");
        std::fs::write(&path, "discovery/drive.v3.json\n\ndiscovery/foo.v1.json\n").unwrap();

        let list = FileList::from_changed_files(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.names(), ["drive.v3.json", "foo.v1.json"]);
    }

    #[test]
    fn changed_files_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileList::from_changed_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn sources_union_sorted() {
        let current = InMemorySource::new();
        current.insert("b.v1.json", json!({}));
        current.insert("a.v1.json", json!({}));
        let new = InMemorySource::new();
        new.insert("b.v1.json", json!({}));
        new.insert("c.v1.json", json!({}));

        let list = FileList::from_sources(&current, &new).unwrap();
        assert_eq!(list.into_names(), ["a.v1.json", "b.v1.json", "c.v1.json"]);
    }

    #[test]
    fn empty_list() {
        assert!(FileList::from_names(Vec::<String>::new()).is_empty());
    }
}
