//! In-memory snapshot store
//!
//! An ordered map behind a lock. Used by tests and by runs that do not
//! need the snapshot to outlive the process.

use super::store::{SnapshotStore, StoreOp, StoredCompany};
use crate::error::{ProcessorError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    companies: BTreeMap<String, StoredCompany>,
    metadata: HashMap<String, String>,
}

/// Ordered in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ProcessorError {
    ProcessorError::store("in-memory store lock poisoned")
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn clear(&self) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.companies.clear();
        inner.metadata.clear();
        Ok(())
    }

    async fn get(&self, company_number: &str) -> Result<Option<StoredCompany>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.companies.get(company_number).cloned())
    }

    async fn write_batch(&self, ops: Vec<StoreOp>) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        for op in ops {
            match op {
                StoreOp::Put {
                    company_number,
                    company,
                } => {
                    inner.companies.insert(company_number, company);
                }
                StoreOp::Delete { company_number } => {
                    inner.companies.remove(&company_number);
                }
            }
        }
        Ok(())
    }

    async fn entries_after(
        &self,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<(String, StoredCompany)>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let lower = match after {
            Some(key) => Bound::Excluded(key.to_string()),
            None => Bound::Unbounded,
        };
        Ok(inner
            .companies
            .range((lower, Bound::Unbounded))
            .take(limit)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.companies.len())
    }

    async fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.metadata.get(key).cloned())
    }

    async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.metadata.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put(number: &str, name: &str) -> StoreOp {
        StoreOp::Put {
            company_number: number.to_string(),
            company: StoredCompany::new(json!({ "company_name": name }), None),
        }
    }

    #[tokio::test]
    async fn test_batch_applies_in_order() {
        let store = MemoryStore::new();
        store
            .write_batch(vec![
                put("00000002", "FIRST"),
                put("00000001", "ONE"),
                put("00000002", "SECOND"),
                StoreOp::Delete {
                    company_number: "00000001".to_string(),
                },
            ])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let stored = store.get("00000002").await.unwrap().unwrap();
        assert_eq!(stored.record, json!({ "company_name": "SECOND" }));
        assert!(store.get("00000001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_are_paged_in_key_order() {
        let store = MemoryStore::new();
        store
            .write_batch(vec![put("C", "c"), put("A", "a"), put("B", "b")])
            .await
            .unwrap();

        let first = store.entries_after(None, 2).await.unwrap();
        let keys: Vec<_> = first.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);

        let rest = store.entries_after(Some("B"), 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].0, "C");
    }

    #[tokio::test]
    async fn test_clear_removes_metadata() {
        let store = MemoryStore::new();
        store.set_metadata("snapshot_date", "2024-01-05").await.unwrap();
        store.write_batch(vec![put("A", "a")]).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.get_metadata("snapshot_date").await.unwrap(), None);
    }
}
