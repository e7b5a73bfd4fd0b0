//! Command-line argument definitions
//!
//! Defines the CLI using the clap derive API: a `convert` command for
//! one-shot product conversion and a `snapshot` command group for
//! building and updating point-in-time company snapshots.

use crate::config::ProcessorConfig;
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_READ_BUFFER_SIZE};
use crate::error::{ProcessorError, Result};
use crate::models::{OutputFormat, Product};
use crate::processor::{FileSelection, Source, UpdateSources};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// CLI arguments for the Companies House processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "companies_house_processor",
    version,
    about = "Convert Companies House bulk data products to CSV or JSON",
    long_about = "Decodes the fixed-width and CSV bulk products published by Companies House \
                  (100 gazette transactions, 101 company data updates, 183 company snapshot, \
                  216 officer snapshot, 217 free company data) into canonical company, officer \
                  and transaction records, and rebuilds current company snapshots by replaying \
                  update transactions over the newest base snapshot."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert one bulk product to CSV or JSON
    Convert(ConvertArgs),
    /// Build or update a company snapshot
    #[command(subcommand)]
    Snapshot(SnapshotCommands),
}

/// Snapshot subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum SnapshotCommands {
    /// Load the newest base snapshot and replay every later update file
    Build(SnapshotBuildArgs),
    /// Replay update files newer than an existing snapshot store
    Update(SnapshotUpdateArgs),
}

/// Output and processing options shared by every command
#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Output file (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "csv", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Only emit these company numbers (comma-separated)
    #[arg(long = "companies", value_name = "LIST", value_delimiter = ',')]
    pub companies: Option<Vec<String>>,

    /// Only emit company numbers listed in this file, one per line
    #[arg(long = "companies-file", value_name = "PATH")]
    pub companies_file: Option<PathBuf>,

    /// Store operations buffered before a flush
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE, value_name = "N")]
    pub batch_size: usize,

    /// Read buffer size in bytes
    #[arg(long = "read-buffer", default_value_t = DEFAULT_READ_BUFFER_SIZE, value_name = "BYTES")]
    pub read_buffer_size: usize,

    /// Disable progress bars
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl OutputArgs {
    /// Company numbers from `--companies` and `--companies-file`
    pub fn company_filter(&self) -> Result<Option<BTreeSet<String>>> {
        let mut companies = BTreeSet::new();
        if let Some(list) = &self.companies {
            companies.extend(list.iter().map(|number| number.trim().to_string()));
        }
        if let Some(path) = &self.companies_file {
            let contents = fs::read_to_string(path).map_err(|_| ProcessorError::InputNotFound {
                path: path.clone(),
            })?;
            companies.extend(contents.lines().map(|line| line.trim().to_string()));
        }
        companies.retain(|number| !number.is_empty());

        let requested = self.companies.is_some() || self.companies_file.is_some();
        Ok(requested.then_some(companies))
    }

    /// Processing configuration from these options
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        let mut config = ProcessorConfig::default()
            .with_output_format(self.format)
            .with_batch_size(self.batch_size)
            .with_read_buffer_size(self.read_buffer_size);
        if let Some(companies) = self.company_filter()? {
            config = config.with_company_filter(companies);
        }
        if self.no_progress {
            config = config.without_progress();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Product to decode (100, 101, 183, 216 or 217)
    #[arg(short = 'p', long = "product", value_name = "PRODUCT")]
    pub product: Product,

    /// Input file or directory (stdin when omitted or `-`)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// File name glob when the input is a directory
    #[arg(long = "pattern", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Only read the lexicographically last matching file
    #[arg(long = "latest", conflicts_with = "since")]
    pub latest: bool,

    /// Only read files whose yyyy/MM/dd path is after this date
    #[arg(long = "since", value_name = "YYYY-MM-DD")]
    pub since: Option<NaiveDate>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ConvertArgs {
    pub fn selection(&self) -> FileSelection {
        match (self.latest, self.since) {
            (true, _) => FileSelection::Latest,
            (false, Some(date)) => FileSelection::Since(date),
            (false, None) => FileSelection::All,
        }
    }

    /// Resolve the input argument into a source
    pub async fn source(&self) -> Result<Source> {
        let pattern = self
            .pattern
            .as_deref()
            .unwrap_or_else(|| self.product.default_pattern());
        Source::from_path(self.input.clone(), pattern, self.selection()).await
    }
}

/// Update feed locations shared by the snapshot commands
#[derive(Debug, Clone, clap::Args)]
pub struct UpdateArgs {
    /// Directory of product 101 update files
    #[arg(long = "updates", value_name = "DIR")]
    pub updates: Option<PathBuf>,

    /// Directory of product 100 files used for runs missing from --updates
    #[arg(long = "gazette", value_name = "DIR")]
    pub gazette: Option<PathBuf>,

    /// Snapshot store file
    #[arg(long = "store", value_name = "PATH")]
    pub store_path: Option<PathBuf>,
}

impl UpdateArgs {
    pub fn sources(&self) -> UpdateSources {
        UpdateSources {
            data_updates: self.updates.clone(),
            gazette_updates: self.gazette.clone(),
        }
    }

    pub fn apply(&self, config: ProcessorConfig) -> ProcessorConfig {
        match &self.store_path {
            Some(path) => config.with_store_path(path.clone()),
            None => config,
        }
    }
}

/// Arguments for `snapshot build`
#[derive(Debug, Clone, Parser)]
pub struct SnapshotBuildArgs {
    /// Base snapshot file, or a directory whose newest file is used
    #[arg(long = "base", value_name = "PATH")]
    pub base: PathBuf,

    /// Product of the base snapshot (183 or 217)
    #[arg(long = "base-product", default_value = "183", value_name = "PRODUCT")]
    pub base_product: Product,

    /// Keep the store in memory instead of on disk
    #[arg(long = "in-memory")]
    pub in_memory: bool,

    /// Skip transactions not newer than the record they update
    #[arg(long = "skip-stale")]
    pub skip_stale: bool,

    #[command(flatten)]
    pub updates: UpdateArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SnapshotBuildArgs {
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        let mut config = self.updates.apply(self.output.to_config()?);
        if self.skip_stale {
            config = config.with_skip_stale_updates();
        }
        Ok(config)
    }

    pub async fn source(&self) -> Result<Source> {
        Source::from_path(
            Some(self.base.clone()),
            self.base_product.default_pattern(),
            FileSelection::Latest,
        )
        .await
    }
}

/// Arguments for `snapshot update`
#[derive(Debug, Clone, Parser)]
pub struct SnapshotUpdateArgs {
    #[command(flatten)]
    pub updates: UpdateArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SnapshotUpdateArgs {
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        Ok(self.updates.apply(self.output.to_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_convert_args() {
        let args = Args::try_parse_from([
            "companies-house-processor",
            "convert",
            "-p",
            "prod183",
            "data/",
            "--latest",
            "--format",
            "json",
            "--companies",
            "00000118, 00000119",
        ])
        .unwrap();

        let Some(Commands::Convert(convert)) = args.command else {
            panic!("expected convert");
        };
        assert_eq!(convert.product, Product::Prod183);
        assert_eq!(convert.selection(), FileSelection::Latest);
        assert_eq!(convert.output.format, OutputFormat::Json);

        let filter = convert.output.company_filter().unwrap().unwrap();
        assert_eq!(
            filter.into_iter().collect::<Vec<_>>(),
            vec!["00000118".to_string(), "00000119".to_string()]
        );
    }

    #[test]
    fn test_since_and_latest_conflict() {
        let result = Args::try_parse_from([
            "companies-house-processor",
            "convert",
            "-p",
            "101",
            "--latest",
            "--since",
            "2024-01-05",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_companies_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("companies.txt");
        std::fs::write(&path, "00000118\n\n  SC000001  \n").unwrap();

        let args = Args::try_parse_from([
            "companies-house-processor",
            "snapshot",
            "build",
            "--base",
            "base/",
            "--companies-file",
            path.to_str().unwrap(),
            "--skip-stale",
        ])
        .unwrap();
        let Some(Commands::Snapshot(SnapshotCommands::Build(build))) = args.command else {
            panic!("expected snapshot build");
        };

        let config = build.to_config().unwrap();
        assert!(config.skip_stale_updates);
        assert!(config.includes_company("SC000001"));
        assert!(!config.includes_company("00000119"));
    }

    #[test]
    fn test_log_levels() {
        let parse = |flags: &[&str]| {
            let mut argv = vec!["companies-house-processor"];
            argv.extend_from_slice(flags);
            Args::try_parse_from(argv).unwrap().get_log_level()
        };
        assert_eq!(parse(&[]), "info");
        assert_eq!(parse(&["-v"]), "debug");
        assert_eq!(parse(&["-vv"]), "trace");
        assert_eq!(parse(&["-q"]), "warn");
    }

    #[test]
    fn test_rejects_oversized_batch() {
        let args = Args::try_parse_from([
            "companies-house-processor",
            "snapshot",
            "update",
            "--batch-size",
            "60000",
        ])
        .unwrap();
        let Some(Commands::Snapshot(SnapshotCommands::Update(update))) = args.command else {
            panic!("expected snapshot update");
        };
        assert!(update.to_config().is_err());
    }
}
