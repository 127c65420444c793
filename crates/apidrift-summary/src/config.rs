use std::path::Path;

use apidrift_artifacts::DEFAULT_SUMMARY_FILE_NAME;
use apidrift_diff::IgnoreList;
use apidrift_flatten::{FlattenOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

use crate::error::{SummaryError, SummaryResult};

/// Files submitted to a worker at a time.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Which key-paths are excluded from diffing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreMode {
    /// The historical discovery list, with `title` and `url` merged into a
    /// single `titleurl` entry.
    #[default]
    Discovery,
    /// The discovery list with `title` and `url` as separate entries.
    DiscoveryCorrected,
    /// Exactly the given substrings.
    Custom(Vec<String>),
}

impl IgnoreMode {
    pub fn to_ignore_list(&self) -> IgnoreList {
        match self {
            Self::Discovery => IgnoreList::discovery(),
            Self::DiscoveryCorrected => IgnoreList::discovery_corrected(),
            Self::Custom(entries) => IgnoreList::new(entries),
        }
    }
}

/// What to do when one artifact is malformed or nested too deeply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the whole run; no partial changelog is produced.
    #[default]
    Abort,
    /// Log the artifact, leave it out of the changelog, and continue.
    Skip,
}

/// Configuration for a change summary run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Maximum number of batches diffed concurrently.
    pub workers: usize,
    /// Number of files handed to a worker at once.
    pub batch_size: usize,
    /// Key-path exclusions.
    pub ignore: IgnoreMode,
    /// Handling of malformed artifacts.
    pub on_malformed: MalformedPolicy,
    /// Maximum document nesting depth.
    pub max_depth: usize,
    /// Name of the aggregate summary file written next to the verbose files.
    pub summary_file_name: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            batch_size: DEFAULT_BATCH_SIZE,
            ignore: IgnoreMode::default(),
            on_malformed: MalformedPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            summary_file_name: DEFAULT_SUMMARY_FILE_NAME.to_string(),
        }
    }
}

impl SummaryConfig {
    /// Parse a TOML configuration. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> SummaryResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SummaryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> SummaryResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SummaryError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> SummaryResult<()> {
        if self.workers == 0 {
            return Err(SummaryError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(SummaryError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(SummaryError::InvalidConfig("max_depth must be at least 1".into()));
        }
        if self.max_depth > DEFAULT_MAX_DEPTH {
            return Err(SummaryError::InvalidConfig(format!(
                "max_depth must not exceed the parser limit of {DEFAULT_MAX_DEPTH}"
            )));
        }
        if self.summary_file_name.trim().is_empty() {
            return Err(SummaryError::InvalidConfig("summary_file_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SummaryConfig::default();
        assert!(c.workers >= 1);
        assert_eq!(c.batch_size, 5);
        assert_eq!(c.ignore, IgnoreMode::Discovery);
        assert_eq!(c.on_malformed, MalformedPolicy::Abort);
        assert_eq!(c.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(c.summary_file_name, "changelog.summary");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = SummaryConfig::from_toml_str("workers = 10\non_malformed = \"skip\"\n").unwrap();
        assert_eq!(c.workers, 10);
        assert_eq!(c.on_malformed, MalformedPolicy::Skip);
        assert_eq!(c.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn ignore_modes_from_toml() {
        let c = SummaryConfig::from_toml_str("ignore = \"discovery_corrected\"").unwrap();
        assert_eq!(c.ignore, IgnoreMode::DiscoveryCorrected);
        assert!(c.ignore.to_ignore_list().is_ignored("title"));

        let c = SummaryConfig::from_toml_str("[ignore]\ncustom = [\"Etag\", \"kind\"]\n").unwrap();
        assert_eq!(c.ignore, IgnoreMode::Custom(vec!["Etag".into(), "kind".into()]));
        let list = c.ignore.to_ignore_list();
        assert!(list.is_ignored("schemas.File.etag"));
        assert!(!list.is_ignored("description"));
    }

    #[test]
    fn zero_workers_rejected() {
        let err = SummaryConfig::from_toml_str("workers = 0").unwrap_err();
        assert!(matches!(err, SummaryError::InvalidConfig(_)));
    }

    #[test]
    fn max_depth_above_parser_limit_rejected() {
        let err = SummaryConfig::from_toml_str("max_depth = 200").unwrap_err();
        assert!(matches!(err, SummaryError::InvalidConfig(_)));

        let c = SummaryConfig::from_toml_str("max_depth = 128").unwrap();
        assert_eq!(c.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn unparseable_toml_rejected() {
        let err = SummaryConfig::from_toml_str("workers = [").unwrap_err();
        assert!(matches!(err, SummaryError::InvalidConfig(_)));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apidrift.toml");
        std::fs::write(&path, "batch_size = 2\nmax_depth = 16\n").unwrap();

        let c = SummaryConfig::from_file(&path).unwrap();
        assert_eq!(c.batch_size, 2);
        assert_eq!(c.flatten_options().max_depth, 16);
    }
}
