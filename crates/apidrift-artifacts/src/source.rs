use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use apidrift_flatten::{flatten_with, parse_document, FlatDocument, FlattenOptions};
use serde_json::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ArtifactError, ArtifactResult};

/// Extension of the artifacts enumerated by [`ArtifactSource::list`].
pub const ARTIFACT_EXTENSION: &str = "json";

/// A snapshot of API description documents, addressed by file name.
///
/// All implementations must satisfy these invariants:
/// - A file that does not exist is `Ok(None)`, not an error. A document may
///   legitimately exist on only one side of a comparison.
/// - Reads never mutate the snapshot, so concurrent reads are always safe.
/// - I/O and parse errors are propagated, never silently ignored.
pub trait ArtifactSource: Send + Sync {
    /// Load and parse the document stored under `file_name`.
    fn load(&self, file_name: &str) -> ArtifactResult<Option<Value>>;

    /// Whether the snapshot root exists at all.
    fn root_exists(&self) -> bool;

    /// Human-readable location, used in logs and errors.
    fn describe(&self) -> String;

    /// File names of all artifacts in the snapshot, sorted.
    fn list(&self) -> ArtifactResult<Vec<String>>;

    /// Load `file_name` and flatten it. A missing file flattens to the
    /// empty document.
    fn load_flat(&self, file_name: &str, options: &FlattenOptions) -> ArtifactResult<FlatDocument> {
        let doc = self.load(file_name)?;
        flatten_with(doc.as_ref(), options).map_err(|source| ArtifactError::Document {
            file: file_name.to_string(),
            source,
        })
    }
}

/// A directory of JSON artifacts on disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail with [`ArtifactError::DirectoryMissing`] unless the root exists.
    pub fn require_root(&self) -> ArtifactResult<()> {
        if self.root_exists() {
            Ok(())
        } else {
            Err(ArtifactError::DirectoryMissing(self.root.clone()))
        }
    }
}

impl ArtifactSource for DirectorySource {
    fn load(&self, file_name: &str) -> ArtifactResult<Option<Value>> {
        let path = self.root.join(file_name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "artifact not present");
                return Ok(None);
            }
            Err(e) => return Err(ArtifactError::io(path, e)),
        };

        let doc = parse_document(&bytes).map_err(|source| ArtifactError::Document {
            file: file_name.to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "artifact loaded");
        Ok(Some(doc))
    }

    fn root_exists(&self) -> bool {
        self.root.is_dir()
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> ArtifactResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().is_some_and(|e| e == ARTIFACT_EXTENSION) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn load_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "drive.v3.json", r#"{"name": "drive"}"#);

        let source = DirectorySource::new(dir.path());
        let doc = source.load("drive.v3.json").unwrap();
        assert_eq!(doc, Some(json!({"name": "drive"})));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.load("absent.v1.json").unwrap().is_none());

        let flat = source.load_flat("absent.v1.json", &FlattenOptions::default()).unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn malformed_file_is_document_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.v1.json", "{not json");

        let source = DirectorySource::new(dir.path());
        let err = source.load("bad.v1.json").unwrap_err();
        assert!(matches!(err, ArtifactError::Document { ref file, .. } if file == "bad.v1.json"));
        assert!(err.as_flatten_error().is_some());
    }

    #[test]
    fn load_flat_flattens() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "foo.v1.json", r#"{"a": {"b": 1}}"#);

        let source = DirectorySource::new(dir.path());
        let flat = source.load_flat("foo.v1.json", &FlattenOptions::default()).unwrap();
        assert_eq!(flat.get("a.b"), Some(&json!(1)));
    }

    #[test]
    fn require_root_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let source = DirectorySource::new(&missing);
        assert!(!source.root_exists());
        assert!(matches!(
            source.require_root(),
            Err(ArtifactError::DirectoryMissing(p)) if p == missing
        ));
        assert!(DirectorySource::new(dir.path()).require_root().is_ok());
    }

    #[test]
    fn list_only_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zeta.v1.json", "{}");
        write(dir.path(), "alpha.v2.json", "{}");
        write(dir.path(), "changed_files", "alpha.v2.json\n");
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.list().unwrap(), ["alpha.v2.json", "zeta.v1.json"]);
    }
}
