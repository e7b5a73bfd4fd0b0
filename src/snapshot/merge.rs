//! Deep merge and batched writes
//!
//! The batch writer keeps pending writes in an overlay that reads consult
//! before the store, so flush boundaries never change what a later
//! transaction sees.

use super::store::{SnapshotStore, StoreOp, StoredCompany};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Merge `patch` into `base`
///
/// Objects merge key by key; any other patch value (scalar or array)
/// replaces the base value.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Buffered writer over a snapshot store
pub struct BatchWriter<'a, S: SnapshotStore + ?Sized> {
    store: &'a S,
    batch_size: usize,
    pending: HashMap<String, Option<StoredCompany>>,
    order: Vec<String>,
    flushed: usize,
}

impl<'a, S: SnapshotStore + ?Sized> BatchWriter<'a, S> {
    pub fn new(store: &'a S, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
            pending: HashMap::new(),
            order: Vec::new(),
            flushed: 0,
        }
    }

    /// Current value for a key, pending writes first
    pub async fn get(&self, company_number: &str) -> Result<Option<StoredCompany>> {
        match self.pending.get(company_number) {
            Some(pending) => Ok(pending.clone()),
            None => self.store.get(company_number).await,
        }
    }

    /// Replace the value for a key
    pub async fn put(&mut self, company_number: String, company: StoredCompany) -> Result<()> {
        self.stage(company_number, Some(company)).await
    }

    /// Remove a key
    pub async fn delete(&mut self, company_number: String) -> Result<()> {
        self.stage(company_number, None).await
    }

    async fn stage(&mut self, company_number: String, value: Option<StoredCompany>) -> Result<()> {
        if !self.pending.contains_key(&company_number) {
            self.order.push(company_number.clone());
        }
        self.pending.insert(company_number, value);

        if self.pending.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Write every pending operation to the store
    pub async fn flush(&mut self) -> Result<()> {
        if self.order.is_empty() {
            return Ok(());
        }

        let ops: Vec<StoreOp> = self
            .order
            .drain(..)
            .filter_map(|company_number| {
                let value = self.pending.remove(&company_number)?;
                Some(match value {
                    Some(company) => StoreOp::Put {
                        company_number,
                        company,
                    },
                    None => StoreOp::Delete { company_number },
                })
            })
            .collect();

        debug!("Flushing batch of {} operation(s)", ops.len());
        self.flushed += ops.len();
        self.store.write_batch(ops).await
    }

    /// Operations written to the store so far
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    /// Operations waiting for the next flush
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
