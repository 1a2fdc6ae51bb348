use axum::{body::Bytes, extract::State, Json};
use error_common::log_error;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse};
use crate::export::ExportReceipt;
use crate::server::KarteServer;

/// Record selection for an export. Accepts a bare id array, an object with
/// `record_ids`, or an empty body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ExportRequest {
    Ids(Vec<u64>),
    Selection { record_ids: Option<Vec<u64>> },
}

impl ExportRequest {
    fn into_ids(self) -> Vec<u64> {
        match self {
            ExportRequest::Ids(ids) => ids,
            ExportRequest::Selection { record_ids } => record_ids.unwrap_or_default(),
        }
    }
}

/// Parse the selected ids; an empty body or `null` selects everything
fn parse_selection(body: &[u8]) -> Result<Vec<u64>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let request: Option<ExportRequest> = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("エクスポート対象の指定が正しくありません: {e}")))?;
    Ok(request.map(ExportRequest::into_ids).unwrap_or_default())
}

/// Export saved records to a spreadsheet (stub, nothing is written)
#[utoipa::path(
    post,
    path = "/api/export-to-sheets",
    tag = "records",
    request_body(content = ExportRequest, description = "Record ids to export; all records when omitted or empty"),
    responses(
        (status = 200, description = "Export receipt", body = ExportReceipt),
        (status = 400, description = "Malformed selection", body = ApiErrorResponse),
        (status = 500, description = "Export failure", body = ApiErrorResponse)
    )
)]
pub async fn export_to_sheets(
    State(server): State<KarteServer>,
    body: Bytes,
) -> Result<Json<ExportReceipt>, ApiError> {
    let ids = parse_selection(&body)?;

    let records = server
        .records
        .select(&ids)
        .await
        .map_err(|e| {
            log_error("export_to_sheets", &e);
            ApiError::Export(e.to_string())
        })?;

    let receipt = server
        .exporter
        .export(&records)
        .await
        .map_err(|e| {
            log_error("export_to_sheets", &e);
            ApiError::Export(e.to_string())
        })?;

    Ok(Json(receipt))
}
