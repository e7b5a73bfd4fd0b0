//! Command implementations
//!
//! Wires parsed arguments to the converter and the snapshot engine, sets
//! up logging and reports run summaries.

use crate::cli::args::{
    Args, Commands, ConvertArgs, OutputArgs, SnapshotBuildArgs, SnapshotCommands,
    SnapshotUpdateArgs,
};
use crate::models::Product;
use crate::processor::{Converter, RecordSink, create_sink, print_summary};
use crate::snapshot::{MemoryStore, SnapshotEngine, SnapshotStats, SqliteStore};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info, warn};

/// Run the parsed command
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    match &args.command {
        Some(Commands::Convert(convert)) => run_convert(convert).await,
        Some(Commands::Snapshot(SnapshotCommands::Build(build))) => run_snapshot_build(build).await,
        Some(Commands::Snapshot(SnapshotCommands::Update(update))) => {
            run_snapshot_update(update).await
        }
        None => Ok(()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("companies_house_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Output writer for a run: the requested file or stdout
fn open_output(output: &OutputArgs) -> Result<Box<dyn Write + Send>> {
    Ok(match &output.output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            info!("Writing output to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn open_sink(output: &OutputArgs, product: Product) -> Result<Box<dyn RecordSink + Send>> {
    Ok(create_sink(output.format, product, open_output(output)?)?)
}

async fn run_convert(args: &ConvertArgs) -> Result<()> {
    let config = args.output.to_config()?;
    let source = args.source().await?;
    // Resolve before creating the output so a bad input leaves no file behind
    source.resolve()?;

    let converter = Converter::new(config)?;
    let mut sink = open_sink(&args.output, args.product)?;
    let stats = converter
        .convert(args.product, &source, sink.as_mut())
        .await?;

    print_summary(&format!("Converted {}", args.product), &stats);
    Ok(())
}

async fn run_snapshot_build(args: &SnapshotBuildArgs) -> Result<()> {
    let config = args.to_config()?;
    let source = args.source().await?;
    source.resolve()?;
    let updates = args.updates.sources();
    if updates.is_empty() {
        warn!("No update directories given; the snapshot will only contain the base records");
    }

    let mut sink = open_sink(&args.output, args.base_product)?;
    let stats = if args.in_memory {
        let store = MemoryStore::new();
        let engine = SnapshotEngine::new(&store, config)?;
        engine
            .build(&source, args.base_product, &updates, sink.as_mut())
            .await?
    } else {
        info!("Using snapshot store {}", config.store_path.display());
        let store = SqliteStore::open(&config.store_path)
            .await
            .with_context(|| {
                format!("Failed to open snapshot store {}", config.store_path.display())
            })?;
        let engine = SnapshotEngine::new(&store, config)?;
        let result = engine
            .build(&source, args.base_product, &updates, sink.as_mut())
            .await;
        store.close().await;
        result.context("Snapshot build failed")?
    };

    report(&stats);
    Ok(())
}

async fn run_snapshot_update(args: &SnapshotUpdateArgs) -> Result<()> {
    let config = args.to_config()?.with_skip_stale_updates();
    let updates = args.updates.sources();

    info!("Using snapshot store {}", config.store_path.display());
    let store = SqliteStore::open(&config.store_path)
        .await
        .with_context(|| format!("Failed to open snapshot store {}", config.store_path.display()))?;
    let engine = SnapshotEngine::new(&store, config)?;
    let result = async {
        // Keep the column layout of the product the store was built from
        let product = engine.base_product().await?.unwrap_or(Product::Prod183);
        let mut sink = open_sink(&args.output, product)?;
        Ok::<_, anyhow::Error>(engine.update(&updates, sink.as_mut()).await?)
    }
    .await;
    store.close().await;

    report(&result?);
    Ok(())
}

fn report(stats: &SnapshotStats) {
    for warning in stats.warnings.iter().take(MAX_REPORTED_WARNINGS) {
        eprintln!("warning: {}", warning);
    }
    if stats.warnings.len() > MAX_REPORTED_WARNINGS {
        eprintln!(
            "warning: {} more update(s) referenced unknown companies",
            stats.warnings.len() - MAX_REPORTED_WARNINGS
        );
    }
    stats.print_summary();
}

/// Warnings echoed individually in the run summary
const MAX_REPORTED_WARNINGS: usize = 20;
