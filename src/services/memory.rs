//! In-memory DataSource

use ahash::AHashMap;
use std::sync::Arc;

use super::{Credential, DataSource};
use crate::domain::{EntityType, Record, RecordSet};
use crate::error::Result;

/// Fixed per-entity record sets, for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    records: AHashMap<EntityType, RecordSet>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, entity: EntityType, records: Vec<Record>) -> Self {
        self.insert(entity, records);
        self
    }

    /// Replace the records of `entity`
    pub fn insert(&mut self, entity: EntityType, records: Vec<Record>) {
        self.records.insert(entity, Arc::new(records));
    }
}

impl DataSource for MemoryDataSource {
    async fn fetch_all(&self, entity: EntityType, _credential: &Credential) -> Result<RecordSet> {
        let records = self.records.get(&entity).cloned().unwrap_or_default();
        tracing::debug!(entity = %entity, count = records.len(), "Served records from memory");
        Ok(records)
    }
}
