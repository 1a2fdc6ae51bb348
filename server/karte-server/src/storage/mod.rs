//! Record storage for Voice Karte
//!
//! Records are kept in process memory only and are lost on restart.

pub mod memory;

pub use memory::InMemoryRecordStore;

use async_trait::async_trait;
use dictation_service::{MedicalRecord, StoredRecord};
use error_common::Result;

/// Append-only store of saved medical records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a record and return its id. Ids start at 1 and increase by
    /// one per save.
    async fn save(&self, record: MedicalRecord) -> Result<u64>;

    /// All records in insertion order
    async fn list(&self) -> Result<Vec<StoredRecord>>;

    /// Records whose id is in `ids`, or every record when `ids` is empty
    async fn select(&self, ids: &[u64]) -> Result<Vec<StoredRecord>> {
        let records = self.list().await?;
        if ids.is_empty() {
            return Ok(records);
        }
        Ok(records.into_iter().filter(|r| ids.contains(&r.id)).collect())
    }
}
