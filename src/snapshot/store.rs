//! Snapshot store abstraction
//!
//! Maps company numbers to partial canonical company records plus the
//! date each record was last touched. Backends must iterate in key order
//! so that a drained snapshot is stable between runs.

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Metadata key holding the base snapshot's production date
pub const SNAPSHOT_DATE_KEY: &str = "snapshot_date";

/// Metadata key holding the date of the newest applied update file
pub const LAST_UPDATE_DATE_KEY: &str = "last_update_date";

/// Metadata key holding the product code of the base snapshot
pub const BASE_PRODUCT_KEY: &str = "base_product";

/// A stored company record
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCompany {
    /// Sparse canonical company as JSON
    pub record: Value,
    /// Provenance date of the last accepted write
    pub last_updated: Option<NaiveDate>,
}

impl StoredCompany {
    pub fn new(record: Value, last_updated: Option<NaiveDate>) -> Self {
        Self {
            record,
            last_updated,
        }
    }
}

/// A single buffered write
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Put {
        company_number: String,
        company: StoredCompany,
    },
    Delete {
        company_number: String,
    },
}

/// Keyed storage for a snapshot run
///
/// One store instance backs one run; concurrent runs need distinct stores.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Remove every record and all metadata
    async fn clear(&self) -> Result<()>;

    /// Point lookup by company number
    async fn get(&self, company_number: &str) -> Result<Option<StoredCompany>>;

    /// Apply a batch of writes in order, atomically where the backend allows
    async fn write_batch(&self, ops: Vec<StoreOp>) -> Result<()>;

    /// Up to `limit` records with keys strictly after `after`, in key order
    async fn entries_after(
        &self,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<(String, StoredCompany)>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;

    /// Read a metadata value
    async fn get_metadata(&self, key: &str) -> Result<Option<String>>;

    /// Write a metadata value
    async fn set_metadata(&self, key: &str, value: &str) -> Result<()>;
}

/// Read a metadata value stored as an ISO date
pub async fn metadata_date<S>(store: &S, key: &str) -> Result<Option<NaiveDate>>
where
    S: SnapshotStore + ?Sized,
{
    Ok(store
        .get_metadata(key)
        .await?
        .and_then(|value| NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok()))
}

/// Record a date as metadata in ISO form
pub async fn set_metadata_date<S>(store: &S, key: &str, date: NaiveDate) -> Result<()>
where
    S: SnapshotStore + ?Sized,
{
    store
        .set_metadata(key, &date.format("%Y-%m-%d").to_string())
        .await
}
