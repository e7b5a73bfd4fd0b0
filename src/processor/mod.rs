//! Conversion pipeline
//!
//! Orchestrates a convert run: resolve the input source, stream-decode
//! every line for the chosen product, and hand canonical records to the
//! output sink in input order.

pub mod decoder;
pub mod discovery;
pub mod progress;
pub mod source;
pub mod streaming;
pub mod writer;

pub use decoder::{DecodedLine, DecodedRecord, LineDecoder};
pub use discovery::{UpdateFile, UpdateSources, discover_update_files};
pub use progress::ProgressReporter;
pub use source::{FileSelection, Input, LineReader, Source};
pub use streaming::RecordStream;
pub use writer::{CollectingSink, CsvSink, JsonSink, RecordSink, columns_for, create_sink};

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::models::{ProcessingStats, Product};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Converter from one bulk product to canonical records
#[derive(Debug, Clone)]
pub struct Converter {
    config: ProcessorConfig,
}

impl Converter {
    /// Create a converter with validated configuration
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Convert every record of `source` into `sink`
    ///
    /// Input resolution errors are raised before anything is written. A
    /// structural error mid-stream aborts the run; records already written
    /// stay written.
    pub async fn convert(
        &self,
        product: Product,
        source: &Source,
        sink: &mut dyn RecordSink,
    ) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        debug!("Converting {} from {:?}", product, source);

        let mut stream = RecordStream::open(source, product, &self.config)?;
        while let Some(record) = stream.next_record().await? {
            sink.write_record(&record.into_output()?)?;
        }
        sink.finish()?;

        let stats = ProcessingStats {
            records_written: sink.records_written(),
            processing_time_ms: start_time.elapsed().as_millis(),
            ..stream.stats().clone()
        };
        info!(
            "Converted {} record(s) from {} line(s) in {}ms",
            stats.records_written, stats.lines_read, stats.processing_time_ms
        );
        Ok(stats)
    }
}

/// Print a coloured run summary to stderr
pub fn print_summary(title: &str, stats: &ProcessingStats) {
    eprintln!("\n{}", title.bright_green().bold());
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        stats.lines_read.to_string().bright_white()
    );
    eprintln!(
        "  {} {} header, {} trailer, {} unknown",
        "Lines skipped:".bright_cyan(),
        stats.header_lines,
        stats.trailer_lines,
        stats.unknown_lines
    );
    if stats.records_filtered > 0 {
        eprintln!(
            "  {} {}",
            "Filtered out:".bright_cyan(),
            stats.records_filtered.to_string().bright_white()
        );
    }
    eprintln!(
        "  {} {}",
        "Records written:".bright_cyan(),
        stats.records_written.to_string().bright_white().bold()
    );
}

#[cfg(test)]
pub mod tests;
