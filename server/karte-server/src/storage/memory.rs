use async_trait::async_trait;
use dictation_service::{MedicalRecord, StoredRecord};
use error_common::{KarteError, Result};
use tokio::sync::RwLock;

use super::RecordStore;

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, record: MedicalRecord) -> Result<u64> {
        // id assignment and append under one guard
        let mut records = self.records.write().await;
        let id = u64::try_from(records.len())
            .map(|len| len + 1)
            .map_err(|e| KarteError::StorageError(format!("record id overflow: {e}")))?;

        records.push(StoredRecord::new(id, record));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.records.read().await.clone())
    }
}
