//! Snapshot merge
//!
//! Rebuilds the current state of the register from a base company
//! snapshot plus the update transaction files published since it. Records
//! live in a keyed [`SnapshotStore`] while updates are replayed, then are
//! drained in company number order.

pub mod engine;
pub mod memory;
pub mod merge;
pub mod sqlite;
pub mod store;

pub use engine::{SnapshotEngine, SnapshotStats};
pub use memory::MemoryStore;
pub use merge::{BatchWriter, deep_merge};
pub use sqlite::SqliteStore;
pub use store::{
    BASE_PRODUCT_KEY, LAST_UPDATE_DATE_KEY, SNAPSHOT_DATE_KEY, SnapshotStore, StoreOp,
    StoredCompany,
};
