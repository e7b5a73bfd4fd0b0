//! Streaming record reader
//!
//! Walks the resolved inputs of a source in order, decoding one line at a
//! time. Records are produced strictly in file order; nothing is read
//! ahead or processed concurrently.

use super::decoder::{DecodedLine, DecodedRecord, LineDecoder};
use super::progress::ProgressReporter;
use super::source::{Input, LineReader, Source};
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::models::{ProcessingStats, Product};
use crate::parser::{FileHeader, date_from_path};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Sequential reader of decoded records across every input of a source
pub struct RecordStream<'c> {
    config: &'c ProcessorConfig,
    product: Product,
    inputs: Vec<Input>,
    next_input: usize,
    current: Option<(Input, LineReader, LineDecoder)>,
    header: Option<FileHeader>,
    progress: ProgressReporter,
    stats: ProcessingStats,
}

impl<'c> RecordStream<'c> {
    /// Resolve the source and prepare to read it
    pub fn open(source: &Source, product: Product, config: &'c ProcessorConfig) -> Result<Self> {
        let inputs = source.resolve()?;
        let progress = if config.show_progress {
            ProgressReporter::new(source.size_estimate()?, &format!("Reading {}", product))
        } else {
            ProgressReporter::disabled()
        };

        debug!("Streaming {} input(s) as {}", inputs.len(), product);
        Ok(Self {
            config,
            product,
            inputs,
            next_input: 0,
            current: None,
            header: None,
            progress,
            stats: ProcessingStats::default(),
        })
    }

    /// Provenance date of the file most recently opened
    ///
    /// Fixed-width files carry it in their header; CSV files only in the
    /// `/yyyy/MM/dd/` segments of their path.
    pub fn production_date(&self) -> Option<NaiveDate> {
        self.header
            .as_ref()
            .and_then(|header| header.production_date)
            .or_else(|| {
                self.next_input
                    .checked_sub(1)
                    .and_then(|index| self.inputs.get(index))
                    .and_then(Input::path)
                    .and_then(date_from_path)
            })
    }

    /// Counters so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Next record passing the company filter, or `None` when all inputs
    /// are exhausted
    pub async fn next_record(&mut self) -> Result<Option<DecodedRecord>> {
        loop {
            if self.current.is_none() && !self.open_next().await? {
                self.progress.finish();
                return Ok(None);
            }
            let Some((_, reader, decoder)) = self.current.as_mut() else {
                continue;
            };

            let line = if decoder.product() == Product::Prod217 {
                reader.next_csv_row().await?
            } else {
                reader.next_line().await?
            };
            let Some(line) = line else {
                self.stats.bytes_read += reader.bytes_read();
                self.current = None;
                continue;
            };

            self.stats.lines_read += 1;
            let decoded = decoder.decode(line)?;
            self.progress.update(reader.bytes_read());

            match decoded {
                DecodedLine::Header(header) => {
                    self.stats.header_lines += 1;
                    self.header = Some(header);
                }
                DecodedLine::ColumnHeader => self.stats.header_lines += 1,
                DecodedLine::Trailer => self.stats.trailer_lines += 1,
                DecodedLine::Unknown => self.stats.unknown_lines += 1,
                DecodedLine::OfficerCompany => {}
                DecodedLine::Record(record) => {
                    if self.config.includes_company(record.company_number()) {
                        return Ok(Some(record));
                    }
                    self.stats.records_filtered += 1;
                }
            }
        }
    }

    async fn open_next(&mut self) -> Result<bool> {
        let Some(input) = self.inputs.get(self.next_input).cloned() else {
            return Ok(false);
        };
        self.next_input += 1;

        info!("Reading {}", input.display_name());
        let reader = LineReader::open(&input, self.config.read_buffer_size).await?;
        self.progress.start_file(&input.display_name());
        self.header = None;
        self.stats.files_processed += 1;
        self.current = Some((input, reader, LineDecoder::new(self.product)));
        Ok(true)
    }
}
