//! Spreadsheet export collaborator.
//!
//! Only a stub exists: it reports success and performs no I/O.

use async_trait::async_trait;
use dictation_service::StoredRecord;
use error_common::Result;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MOCK_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/mock-sheet-id";

/// Result of an export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExportReceipt {
    pub success: bool,
    #[schema(example = "2件の記録をGoogle Sheetsにエクスポートしました")]
    pub message: String,
    #[schema(example = "https://docs.google.com/spreadsheets/d/mock-sheet-id")]
    pub sheet_url: String,
    pub exported_count: usize,
}

#[async_trait]
pub trait RecordExporter: Send + Sync {
    async fn export(&self, records: &[StoredRecord]) -> Result<ExportReceipt>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubSheetsExporter;

#[async_trait]
impl RecordExporter for StubSheetsExporter {
    async fn export(&self, records: &[StoredRecord]) -> Result<ExportReceipt> {
        let count = records.len();
        tracing::info!(exported_count = count, "Export requested (stub, nothing written)");

        Ok(ExportReceipt {
            success: true,
            message: format!("{count}件の記録をGoogle Sheetsにエクスポートしました"),
            sheet_url: MOCK_SHEET_URL.to_string(),
            exported_count: count,
        })
    }
}
