//! Snapshot merge engine
//!
//! A run clears the store, loads the newest base snapshot, replays update
//! files in chronological order and drains the result through a sink:
//! ```text
//! clear -> base load (183 | 217) -> replay (101, gaps from 100) -> drain
//! ```
//! Incremental runs skip the clear and base load, resume after the last
//! applied update file and refuse transactions that are not newer than
//! the record they touch.

use super::merge::{BatchWriter, deep_merge};
use super::store::{
    BASE_PRODUCT_KEY, LAST_UPDATE_DATE_KEY, SNAPSHOT_DATE_KEY, SnapshotStore, StoredCompany,
    metadata_date, set_metadata_date,
};
use crate::config::ProcessorConfig;
use crate::constants::{BASE_LOAD_BATCH_SIZE, DRAIN_PAGE_SIZE};
use crate::error::{ProcessorError, Result};
use crate::models::{Company, ProcessingStats, Product};
use crate::parser::field_parsers::parse_dat_format_date;
use crate::processor::{
    DecodedRecord, FileSelection, RecordSink, RecordStream, Source, UpdateFile, UpdateSources,
    discover_update_files,
};
use crate::transactions::{Operation, Transaction};
use crate::transform::{company_from_transaction, finalise_company, to_sparse_value};
use chrono::NaiveDate;
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Counters for a snapshot run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotStats {
    /// Line and record counters across the base and every update file
    pub processing: ProcessingStats,
    pub snapshot_date: Option<NaiveDate>,
    pub base_records: usize,
    pub update_files: usize,
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub ignored: usize,
    pub stale_skipped: usize,
    /// Updates dropped because the company was not in the store
    pub missing_updates: usize,
    pub warnings: Vec<String>,
}

impl SnapshotStats {
    /// Transactions that changed the store
    pub fn applied(&self) -> usize {
        self.added + self.updated + self.deleted
    }

    /// Print a coloured run summary to stderr
    pub fn print_summary(&self) {
        eprintln!("\n{}", "Snapshot Summary".bright_green().bold());
        eprintln!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            self.processing.processing_time_ms.to_string().bright_white()
        );
        if let Some(date) = self.snapshot_date {
            eprintln!(
                "  {} {}",
                "Snapshot date:".bright_cyan(),
                date.to_string().bright_white()
            );
        }
        eprintln!(
            "  {} {}",
            "Base records:".bright_cyan(),
            self.base_records.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Update files:".bright_cyan(),
            self.update_files.to_string().bright_white()
        );
        eprintln!(
            "  {} {} added, {} updated, {} deleted, {} ignored",
            "Transactions:".bright_cyan(),
            self.added,
            self.updated,
            self.deleted,
            self.ignored
        );
        if self.stale_skipped > 0 {
            eprintln!(
                "  {} {}",
                "Stale skipped:".bright_cyan(),
                self.stale_skipped.to_string().bright_white()
            );
        }
        if self.missing_updates > 0 {
            eprintln!(
                "  {} {}",
                "Warnings:".bright_red(),
                self.missing_updates.to_string().bright_red().bold()
            );
        }
        eprintln!(
            "  {} {}",
            "Records written:".bright_cyan(),
            self.processing.records_written.to_string().bright_white().bold()
        );
    }
}

/// Received date is not after the record's last update
fn is_stale(received: Option<NaiveDate>, last_updated: Option<NaiveDate>) -> bool {
    matches!((received, last_updated), (Some(received), Some(last)) if received <= last)
}

/// Merge engine over a snapshot store
pub struct SnapshotEngine<'s, S: SnapshotStore + ?Sized> {
    store: &'s S,
    config: ProcessorConfig,
}

impl<'s, S: SnapshotStore + ?Sized> SnapshotEngine<'s, S> {
    /// Create an engine with validated configuration
    pub fn new(store: &'s S, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Product the stored snapshot was built from
    pub async fn base_product(&self) -> Result<Option<Product>> {
        Ok(self
            .store
            .get_metadata(BASE_PRODUCT_KEY)
            .await?
            .and_then(|code| code.parse().ok()))
    }

    /// Build a snapshot from scratch and drain it into `sink`
    pub async fn build(
        &self,
        base: &Source,
        base_product: Product,
        updates: &UpdateSources,
        sink: &mut dyn RecordSink,
    ) -> Result<SnapshotStats> {
        let start_time = Instant::now();
        let mut stats = SnapshotStats::default();

        // Validate inputs before touching the store
        check_base_product(base_product)?;
        let base = newest_only(base);
        base.resolve()?;

        info!("Clearing snapshot store");
        self.store.clear().await?;

        let snapshot_date = self.load_base(&base, base_product, &mut stats).await?;
        let files = discover_update_files(updates, snapshot_date)?;
        self.replay(&files, self.config.skip_stale_updates, &mut stats)
            .await?;

        stats.processing.records_written = self.drain(sink).await?;
        stats.processing.processing_time_ms = start_time.elapsed().as_millis();
        Ok(stats)
    }

    /// Apply update files newer than the stored snapshot, then drain
    pub async fn update(
        &self,
        updates: &UpdateSources,
        sink: &mut dyn RecordSink,
    ) -> Result<SnapshotStats> {
        let start_time = Instant::now();
        let snapshot_date = metadata_date(self.store, SNAPSHOT_DATE_KEY)
            .await?
            .ok_or_else(|| {
                ProcessorError::configuration(
                    "snapshot store has no base snapshot date; run `snapshot build` first",
                )
            })?;
        let last_update = metadata_date(self.store, LAST_UPDATE_DATE_KEY).await?;
        let since = last_update.max(Some(snapshot_date));
        info!("Resuming snapshot of {} after {:?}", snapshot_date, since);

        let mut stats = SnapshotStats {
            snapshot_date: Some(snapshot_date),
            ..Default::default()
        };
        let files = discover_update_files(updates, since)?;
        self.replay(&files, true, &mut stats).await?;

        stats.processing.records_written = self.drain(sink).await?;
        stats.processing.processing_time_ms = start_time.elapsed().as_millis();
        Ok(stats)
    }

    /// Load every record of the base snapshot, tagged with its production date
    pub async fn load_base(
        &self,
        base: &Source,
        product: Product,
        stats: &mut SnapshotStats,
    ) -> Result<Option<NaiveDate>> {
        check_base_product(product)?;
        let mut stream = RecordStream::open(base, product, &self.config)?;
        self.store
            .set_metadata(BASE_PRODUCT_KEY, product.code())
            .await?;
        let mut writer = BatchWriter::new(self.store, BASE_LOAD_BATCH_SIZE);
        let mut snapshot_date = None;

        while let Some(record) = stream.next_record().await? {
            let DecodedRecord::Company(company) = record else {
                continue;
            };
            // The header precedes every record, so the date is known here
            if snapshot_date.is_none() {
                snapshot_date = stream.production_date();
            }
            let number = company.company_number.clone();
            writer
                .put(number, StoredCompany::new(to_sparse_value(&company)?, snapshot_date))
                .await?;
            stats.base_records += 1;
        }
        writer.flush().await?;

        let snapshot_date = snapshot_date.or_else(|| stream.production_date());
        match snapshot_date {
            Some(date) => set_metadata_date(self.store, SNAPSHOT_DATE_KEY, date).await?,
            None => warn!(
                "Base snapshot has no production date; every update file will be replayed"
            ),
        }

        info!(
            "Loaded {} base record(s) dated {:?}",
            stats.base_records, snapshot_date
        );
        stats.snapshot_date = snapshot_date;
        stats.processing.absorb(stream.stats());
        Ok(snapshot_date)
    }

    /// Replay update files in the given order
    pub async fn replay(
        &self,
        files: &[UpdateFile],
        skip_stale: bool,
        stats: &mut SnapshotStats,
    ) -> Result<()> {
        let mut writer = BatchWriter::new(self.store, self.config.batch_size);

        for file in files {
            info!("Replaying {} ({})", file.path.display(), file.product);
            let source = Source::File(file.path.clone());
            let mut stream = RecordStream::open(&source, file.product, &self.config)?;

            while let Some(record) = stream.next_record().await? {
                if let DecodedRecord::Transaction(transaction) = record {
                    self.apply(&mut writer, &transaction, file.date, skip_stale, stats)
                        .await?;
                }
            }

            // Flush per file so the recorded resume point is never ahead of the store
            writer.flush().await?;
            if let Some(date) = file.date {
                set_metadata_date(self.store, LAST_UPDATE_DATE_KEY, date).await?;
            }
            stats.update_files += 1;
            stats.processing.absorb(stream.stats());
        }

        debug!("Replay wrote {} operation(s)", writer.flushed());
        Ok(())
    }

    /// Apply one transaction through the batch writer
    pub async fn apply(
        &self,
        writer: &mut BatchWriter<'_, S>,
        transaction: &Transaction,
        file_date: Option<NaiveDate>,
        skip_stale: bool,
        stats: &mut SnapshotStats,
    ) -> Result<()> {
        let company_number = transaction.company_number().to_string();
        let received = parse_dat_format_date(&transaction.header.received_date).or(file_date);

        match transaction.operation() {
            Operation::Ignore => stats.ignored += 1,
            Operation::Delete => {
                writer.delete(company_number).await?;
                stats.deleted += 1;
            }
            Operation::Add => {
                if skip_stale {
                    let existing = writer.get(&company_number).await?;
                    if existing.is_some_and(|stored| is_stale(received, stored.last_updated)) {
                        stats.stale_skipped += 1;
                        return Ok(());
                    }
                }
                let record = to_sparse_value(&company_from_transaction(transaction))?;
                writer
                    .put(company_number, StoredCompany::new(record, received))
                    .await?;
                stats.added += 1;
            }
            Operation::Update => {
                let Some(mut stored) = writer.get(&company_number).await? else {
                    let message = format!(
                        "Company {} had an update transaction but the record could not be found",
                        company_number
                    );
                    warn!("{}", message);
                    stats.warnings.push(message);
                    stats.missing_updates += 1;
                    return Ok(());
                };
                if skip_stale && is_stale(received, stored.last_updated) {
                    stats.stale_skipped += 1;
                    return Ok(());
                }

                deep_merge(
                    &mut stored.record,
                    to_sparse_value(&company_from_transaction(transaction))?,
                );
                stored.last_updated = received.or(stored.last_updated);
                writer.put(company_number, stored).await?;
                stats.updated += 1;
            }
        }
        Ok(())
    }

    /// Read the store out in key order, finalising each record
    pub async fn drain(&self, sink: &mut dyn RecordSink) -> Result<usize> {
        let mut after: Option<String> = None;
        let mut drained = 0;

        loop {
            let page = self
                .store
                .entries_after(after.as_deref(), DRAIN_PAGE_SIZE)
                .await?;
            let Some((last_key, _)) = page.last() else {
                break;
            };
            after = Some(last_key.clone());

            for (_, stored) in page {
                let company: Company = serde_json::from_value(stored.record)?;
                sink.write_record(&finalise_company(company)?)?;
                drained += 1;
            }
        }

        sink.finish()?;
        info!("Drained {} record(s) from the snapshot store", drained);
        Ok(drained)
    }
}

fn check_base_product(product: Product) -> Result<()> {
    if product.is_company_snapshot() {
        return Ok(());
    }
    Err(ProcessorError::configuration(format!(
        "{} cannot be used as a base snapshot; expected prod183 or prod217",
        product
    )))
}

/// A directory base source only ever reads its newest file
fn newest_only(source: &Source) -> Source {
    match source {
        Source::Directory { path, pattern, .. } => Source::Directory {
            path: path.clone(),
            pattern: pattern.clone(),
            selection: FileSelection::Latest,
        },
        other => other.clone(),
    }
}
