//! Configuration management and validation.
//!
//! Provides the processing configuration shared by the convert and
//! snapshot pipelines: output format, store location, batching and
//! read buffer sizes, and the optional company filter.

use crate::constants::{
    APP_CACHE_DIR, DEFAULT_BATCH_SIZE, DEFAULT_READ_BUFFER_SIZE, DEFAULT_STORE_FILE,
    MAX_BATCH_SIZE,
};
use crate::error::{ProcessorError, Result};
use crate::models::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

/// Global configuration for Companies House processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Output serialisation format
    pub output_format: OutputFormat,

    /// Store operations buffered before a flush (I/O tuning only)
    pub batch_size: usize,

    /// Read buffer size in bytes for input files
    pub read_buffer_size: usize,

    /// Location of the embedded snapshot store
    pub store_path: PathBuf,

    /// Skip transactions not newer than the record's last update
    pub skip_stale_updates: bool,

    /// Only process these company numbers when set
    pub company_filter: Option<BTreeSet<String>>,

    /// Render progress bars on stderr
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Csv,
            batch_size: DEFAULT_BATCH_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            store_path: Self::default_store_path(),
            skip_stale_updates: false,
            company_filter: None,
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    /// Default store location under the user cache directory
    pub fn default_store_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_CACHE_DIR)
            .join(DEFAULT_STORE_FILE)
    }

    /// Set the output format
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Set the store batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the read buffer size
    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    /// Set the snapshot store path
    pub fn with_store_path(mut self, store_path: PathBuf) -> Self {
        self.store_path = store_path;
        self
    }

    /// Enable skipping of stale transactions (incremental loads)
    pub fn with_skip_stale_updates(mut self) -> Self {
        self.skip_stale_updates = true;
        self
    }

    /// Restrict processing to the given company numbers
    pub fn with_company_filter<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filter: BTreeSet<String> = companies
            .into_iter()
            .map(Into::into)
            .map(|number| number.trim().to_uppercase())
            .filter(|number| !number.is_empty())
            .collect();
        self.company_filter = Some(filter);
        self
    }

    /// Disable progress bars
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Whether a company passes the configured filter
    pub fn includes_company(&self, company_number: &str) -> bool {
        match &self.company_filter {
            Some(filter) => filter.contains(company_number),
            None => true,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ProcessorError::configuration(format!(
                "batch_size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }

        if self.read_buffer_size < 8 * 1024 {
            return Err(ProcessorError::configuration(format!(
                "read_buffer_size must be at least 8192 bytes, got {}",
                self.read_buffer_size
            )));
        }

        if let Some(filter) = &self.company_filter {
            if filter.is_empty() {
                return Err(ProcessorError::configuration(
                    "company filter was supplied but contains no company numbers",
                ));
            }
            debug!("Company filter active with {} entries", filter.len());
        }

        Ok(())
    }
}
