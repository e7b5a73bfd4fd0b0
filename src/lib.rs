//! Companies House Processor Library
//!
//! Converts the bulk data products published by Companies House into
//! canonical company, officer and transaction records, and rebuilds
//! current company snapshots from a base snapshot plus update files.
//!
//! This library provides tools for:
//! - Decoding the fixed-width products 100, 101, 183 and 216 and the CSV product 217
//! - Dispatching 30 transaction types to add, update, delete or ignore operations
//! - Mapping records onto the canonical schemas with sparse-field removal
//! - Writing CSV with fixed product column lists, or pretty-printed JSON
//! - Replaying update transactions over a keyed snapshot store

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod snapshot;
pub mod transactions;
pub mod transform;

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use error::{ProcessorError, Result};
pub use models::{Company, Officer, OutputFormat, ProcessingStats, Product};
pub use processor::{Converter, Source};
pub use snapshot::{SnapshotEngine, SnapshotStats};
