use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ArtifactError, ArtifactResult};

/// File name of the aggregate summary written by [`DirectorySink`].
pub const DEFAULT_SUMMARY_FILE_NAME: &str = "changelog.summary";

/// Extension of the per-family verbose files.
pub const VERBOSE_EXTENSION: &str = "verbose";

/// Destination for a finished changelog.
pub trait ReportSink: Send + Sync {
    /// Store the aggregate summary (all families' summary lines).
    fn write_summary(&self, text: &str) -> ArtifactResult<()>;

    /// Store the verbose report of one family.
    fn write_verbose(&self, family: &str, text: &str) -> ArtifactResult<()>;
}

/// Writes the summary and `<family>.verbose` files into one directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    summary_file_name: String,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            summary_file_name: DEFAULT_SUMMARY_FILE_NAME.to_string(),
        }
    }

    pub fn with_summary_file_name(mut self, name: impl Into<String>) -> Self {
        self.summary_file_name = name.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(&self.summary_file_name)
    }

    pub fn verbose_path(&self, family: &str) -> PathBuf {
        self.dir.join(format!("{family}.{VERBOSE_EXTENSION}"))
    }

    fn write_file(&self, path: &Path, text: &str) -> ArtifactResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))?;
        std::fs::write(path, text).map_err(|e| ArtifactError::io(path, e))?;
        info!(path = %path.display(), bytes = text.len(), "report written");
        Ok(())
    }
}

impl ReportSink for DirectorySink {
    fn write_summary(&self, text: &str) -> ArtifactResult<()> {
        self.write_file(&self.summary_path(), text)
    }

    fn write_verbose(&self, family: &str, text: &str) -> ArtifactResult<()> {
        self.write_file(&self.verbose_path(family), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_summary_and_verbose_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sink = DirectorySink::new(&out);

        sink.write_summary("foo(fix): update the api\n").unwrap();
        sink.write_verbose("foo", "foo(fix): update the api\n\n\n#### foo:v1\n\n").unwrap();

        let summary = std::fs::read_to_string(out.join(DEFAULT_SUMMARY_FILE_NAME)).unwrap();
        assert_eq!(summary, "foo(fix): update the api\n");
        let verbose = std::fs::read_to_string(out.join("foo.verbose")).unwrap();
        assert!(verbose.starts_with("foo(fix)"));
    }

    #[test]
    fn custom_summary_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path()).with_summary_file_name("allapis.summary");

        sink.write_summary("x").unwrap();
        assert_eq!(sink.summary_path(), dir.path().join("allapis.summary"));
        assert!(dir.path().join("allapis.summary").exists());
    }
}
