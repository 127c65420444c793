use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apidrift",
    about = "Changelogs between two snapshots of API description documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two artifact directories and print the changelog
    Detect(DetectArgs),
    /// Print the flattened key-paths of one document
    Flatten(FlattenArgs),
}

#[derive(Args)]
pub struct DetectArgs {
    /// Directory with the current artifacts
    #[arg(long, default_value = "main")]
    pub current: PathBuf,
    /// Directory with the new artifacts
    #[arg(long, default_value = "branch")]
    pub new: PathBuf,
    /// Newline-separated list of changed artifact paths
    #[arg(long)]
    pub changed_files: Option<PathBuf>,
    /// Artifact file names to compare; overrides --changed-files
    pub files: Vec<String>,
    /// Write the summary and per-family verbose files here
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub workers: Option<usize>,
    /// Leave malformed artifacts out instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
    /// Ignore `title` and `url` keys separately
    #[arg(long)]
    pub corrected_ignore: bool,
}

#[derive(Args)]
pub struct FlattenArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub max_depth: Option<usize>,
}
