//! Concurrent comparison of many artifacts.

use std::sync::Arc;

use apidrift_artifacts::{ArtifactSource, FileList};
use apidrift_diff::{diff, sort_records, ChangeRecord, DocumentId, IgnoreList};
use apidrift_flatten::FlattenOptions;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::config::{MalformedPolicy, SummaryConfig};
use crate::error::{SummaryError, SummaryResult};
use crate::report::{ChangeReport, SkippedFile};

/// Diff one artifact between the current and new snapshot.
///
/// A file missing on one side contributes only additions or only
/// deletions. A file missing on both sides yields no records.
pub fn compare_file(
    current: &dyn ArtifactSource,
    new: &dyn ArtifactSource,
    file: &str,
    ignore: &IgnoreList,
    options: &FlattenOptions,
) -> SummaryResult<Vec<ChangeRecord>> {
    let id = DocumentId::from_file_name(file).map_err(|source| SummaryError::Diff {
        file: file.to_string(),
        source,
    })?;
    let current_doc = current.load_flat(file, options)?;
    let new_doc = new.load_flat(file, options)?;
    Ok(diff(&current_doc, &new_doc, &id, ignore))
}

/// The change summary between two artifact snapshots.
pub struct ChangeSummary {
    current: Arc<dyn ArtifactSource>,
    new: Arc<dyn ArtifactSource>,
    files: FileList,
    config: SummaryConfig,
    ignore: IgnoreList,
}

impl ChangeSummary {
    /// Validate the inputs of a run.
    ///
    /// Fails with [`SummaryError::ArtifactsDirectoryMissing`] when either
    /// snapshot root does not exist and [`SummaryError::EmptyFileList`] when
    /// there is nothing to compare.
    pub fn new(
        current: Arc<dyn ArtifactSource>,
        new: Arc<dyn ArtifactSource>,
        files: FileList,
        config: SummaryConfig,
    ) -> SummaryResult<Self> {
        for source in [&new, &current] {
            if !source.root_exists() {
                return Err(SummaryError::ArtifactsDirectoryMissing(source.describe()));
            }
        }
        if files.is_empty() {
            return Err(SummaryError::EmptyFileList);
        }
        config.validate()?;

        let ignore = config.ignore.to_ignore_list();
        Ok(Self {
            current,
            new,
            files,
            config,
            ignore,
        })
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Diff every listed artifact and reduce the results into a report.
    ///
    /// Files are submitted in batches of `batch_size`, at most `workers`
    /// batches at a time. Under [`MalformedPolicy::Abort`] the first failure
    /// stops submission and in-flight batches are discarded.
    pub async fn detect_changes(&self) -> SummaryResult<ChangeReport> {
        info!(
            files = self.files.len(),
            workers = self.config.workers,
            batch_size = self.config.batch_size,
            current = %self.current.describe(),
            new = %self.new.describe(),
            "detecting changes"
        );

        let permits = Arc::new(Semaphore::new(self.config.workers));
        let mut jobs: JoinSet<SummaryResult<BatchOutput>> = JoinSet::new();
        let mut collected = BatchOutput::default();

        for files in self.files.names().chunks(self.config.batch_size) {
            while let Some(finished) = jobs.try_join_next() {
                collected.absorb(finished)?;
            }

            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| SummaryError::Worker(e.to_string()))?;
            let batch = Batch {
                current: Arc::clone(&self.current),
                new: Arc::clone(&self.new),
                files: files.to_vec(),
                ignore: self.ignore.clone(),
                options: self.config.flatten_options(),
                policy: self.config.on_malformed,
            };
            jobs.spawn_blocking(move || {
                let _permit = permit;
                batch.run()
            });
        }

        while let Some(finished) = jobs.join_next().await {
            collected.absorb(finished)?;
        }

        let BatchOutput {
            mut records,
            skipped,
        } = collected;
        sort_records(&mut records);

        info!(
            records = records.len(),
            skipped = skipped.len(),
            "change detection complete"
        );
        Ok(ChangeReport::new(records, skipped))
    }
}

impl std::fmt::Debug for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSummary")
            .field("current", &self.current.describe())
            .field("new", &self.new.describe())
            .field("files", &self.files.len())
            .field("config", &self.config)
            .finish()
    }
}

struct Batch {
    current: Arc<dyn ArtifactSource>,
    new: Arc<dyn ArtifactSource>,
    files: Vec<String>,
    ignore: IgnoreList,
    options: FlattenOptions,
    policy: MalformedPolicy,
}

impl Batch {
    fn run(self) -> SummaryResult<BatchOutput> {
        let mut output = BatchOutput::default();
        for file in &self.files {
            match compare_file(
                self.current.as_ref(),
                self.new.as_ref(),
                file,
                &self.ignore,
                &self.options,
            ) {
                Ok(records) => {
                    debug!(file = %file, records = records.len(), "artifact compared");
                    output.records.extend(records);
                }
                Err(e) if self.policy == MalformedPolicy::Skip && e.is_per_file() => {
                    warn!(file = %file, error = %e, "skipping malformed artifact");
                    output.skipped.push(SkippedFile {
                        file: file.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(output)
    }
}

#[derive(Default)]
struct BatchOutput {
    records: Vec<ChangeRecord>,
    skipped: Vec<SkippedFile>,
}

impl BatchOutput {
    fn absorb(
        &mut self,
        finished: Result<SummaryResult<BatchOutput>, JoinError>,
    ) -> SummaryResult<()> {
        let batch = finished.map_err(|e| SummaryError::Worker(e.to_string()))??;
        self.records.extend(batch.records);
        self.skipped.extend(batch.skipped);
        Ok(())
    }
}
