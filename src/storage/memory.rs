use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{compare_by_field, Datastore, StorageKey};
use crate::entity::NoteRecord;
use crate::error::Result;

/// In-process datastore. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    records: RwLock<BTreeMap<StorageKey, NoteRecord>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn get(&self, key: &StorageKey) -> Result<Option<NoteRecord>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, key: &StorageKey, record: &NoteRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(key.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn query(&self, kind: &str, order_by: &str) -> Result<Vec<(StorageKey, NoteRecord)>> {
        let records = self.records.read().await;
        let mut results: Vec<(StorageKey, NoteRecord)> = records
            .iter()
            .filter(|(key, _)| key.kind == kind)
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();

        results.sort_by(|a, b| compare_by_field(order_by, a, b));
        Ok(results)
    }
}
