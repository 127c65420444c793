use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use apidrift_artifacts::{ArtifactSource, DirectorySink, DirectorySource, FileList};
use apidrift_diff::{ChangeRecord, FamilySummary};
use apidrift_flatten::{
    flatten_with, parse_document, FlatDocument, FlattenOptions, DEFAULT_MAX_DEPTH,
};
use apidrift_summary::{
    ChangeReport, ChangeSummary, IgnoreMode, MalformedPolicy, SkippedFile, SummaryConfig,
};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;

/// Changed-file listing looked up inside the new snapshot when no explicit
/// list is given.
const CHANGED_FILES_NAME: &str = "changed_files";

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Detect(args) => cmd_detect(args, &cli.format).await,
        Command::Flatten(args) => cmd_flatten(args, &cli.format),
    }
}

async fn cmd_detect(args: DetectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let current: Arc<dyn ArtifactSource> = Arc::new(DirectorySource::new(&args.current));
    let new: Arc<dyn ArtifactSource> = Arc::new(DirectorySource::new(&args.new));
    let files = resolve_files(&args, current.as_ref(), new.as_ref())?;
    let summary_file_name = config.summary_file_name.clone();

    let summary = ChangeSummary::new(current, new, files, config)?;
    let report = tokio::select! {
        report = summary.detect_changes() => report?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    };

    match format {
        OutputFormat::Text => {
            println!("{}", report.summary_text());
            println!("{}", report.verbose_text());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
        }
    }

    for skipped in report.skipped() {
        eprintln!("{} skipped {}: {}", "!".yellow().bold(), skipped.file.bold(), skipped.reason);
    }

    if let Some(out) = &args.out {
        let sink = DirectorySink::new(out).with_summary_file_name(summary_file_name);
        report.write_to(&sink)?;
        eprintln!(
            "{} Wrote {} and {} verbose file(s) to {}",
            "✓".green().bold(),
            sink.summary_path().display(),
            report.families().len(),
            out.display().to_string().bold(),
        );
    }
    Ok(())
}

fn load_config(args: &DetectArgs) -> anyhow::Result<SummaryConfig> {
    let mut config = match &args.config {
        Some(path) => SummaryConfig::from_file(path)?,
        None => SummaryConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.skip_malformed {
        config.on_malformed = MalformedPolicy::Skip;
    }
    if args.corrected_ignore {
        config.ignore = IgnoreMode::DiscoveryCorrected;
    }
    Ok(config)
}

/// Explicit names win, then an explicit changed-files list, then the
/// `changed_files` listing inside the new snapshot, then every artifact in
/// either snapshot.
fn resolve_files(
    args: &DetectArgs,
    current: &dyn ArtifactSource,
    new: &dyn ArtifactSource,
) -> anyhow::Result<FileList> {
    if !args.files.is_empty() {
        return Ok(FileList::from_names(&args.files));
    }
    if let Some(path) = &args.changed_files {
        return FileList::from_changed_files(path)
            .with_context(|| format!("reading changed files from {}", path.display()));
    }
    let listing = args.new.join(CHANGED_FILES_NAME);
    if listing.is_file() {
        return Ok(FileList::from_changed_files(&listing)?);
    }
    if !current.root_exists() || !new.root_exists() {
        // ChangeSummary reports which directory is missing.
        return Ok(FileList::default());
    }
    Ok(FileList::from_sources(current, new)?)
}

fn cmd_flatten(args: FlattenArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let options = match args.max_depth {
        Some(max_depth) => {
            anyhow::ensure!(
                (1..=DEFAULT_MAX_DEPTH).contains(&max_depth),
                "--max-depth must be between 1 and {DEFAULT_MAX_DEPTH}"
            );
            FlattenOptions { max_depth }
        }
        None => FlattenOptions::default(),
    };
    let flat = read_flat(&args.file, &options)?;

    match format {
        OutputFormat::Text => {
            for (key, value) in &flat {
                println!("{} = {}", key.cyan(), value);
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> =
                flat.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }
    Ok(())
}

fn read_flat(path: &Path, options: &FlattenOptions) -> anyhow::Result<FlatDocument> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = parse_document(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(flatten_with(Some(&doc), options)?)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summaries: Vec<FamilySummary>,
    records: &'a [ChangeRecord],
    skipped: &'a [SkippedFile],
}

impl<'a> From<&'a ChangeReport> for JsonReport<'a> {
    fn from(report: &'a ChangeReport) -> Self {
        Self {
            summaries: report.summaries().into_values().collect(),
            records: report.records(),
            skipped: report.skipped(),
        }
    }
}
