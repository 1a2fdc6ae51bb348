use axum::{extract::rejection::JsonRejection, extract::State, Json};
use dictation_service::{MedicalRecord, StoredRecord};
use error_common::log_error;
use logger_redacted::PiiRedactor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse};
use crate::server::KarteServer;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveRecordResponse {
    pub success: bool,
    #[schema(example = "医療記録が保存されました")]
    pub message: String,
    #[schema(example = 1)]
    pub record_id: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordListResponse {
    pub success: bool,
    pub records: Vec<StoredRecord>,
    pub total: usize,
}

/// Save a reviewed medical record
#[utoipa::path(
    post,
    path = "/api/save-record",
    tag = "records",
    request_body = MedicalRecord,
    responses(
        (status = 200, description = "Record saved", body = SaveRecordResponse),
        (status = 422, description = "Malformed medical record", body = ApiErrorResponse),
        (status = 500, description = "Storage failure", body = ApiErrorResponse)
    )
)]
pub async fn save_record(
    State(server): State<KarteServer>,
    payload: Result<Json<MedicalRecord>, JsonRejection>,
) -> Result<Json<SaveRecordResponse>, ApiError> {
    let Json(record) = payload.map_err(|rejection| ApiError::InvalidRecord(rejection.body_text()))?;

    let patient = PiiRedactor::default().mask_identifier(Some(&record.patient_id));
    let record_id = server
        .records
        .save(record)
        .await
        .map_err(|e| {
            log_error("save_record", &e);
            ApiError::Save(e.to_string())
        })?;

    tracing::info!(record_id, patient = %patient, "Medical record saved");

    Ok(Json(SaveRecordResponse {
        success: true,
        message: "医療記録が保存されました".to_string(),
        record_id,
    }))
}

/// List saved records in insertion order
#[utoipa::path(
    get,
    path = "/api/records",
    tag = "records",
    responses(
        (status = 200, description = "All saved records", body = RecordListResponse),
        (status = 500, description = "Storage failure", body = ApiErrorResponse)
    )
)]
pub async fn list_records(State(server): State<KarteServer>) -> Result<Json<RecordListResponse>, ApiError> {
    let records = server
        .records
        .list()
        .await
        .map_err(|e| {
            log_error("list_records", &e);
            ApiError::Load(e.to_string())
        })?;

    Ok(Json(RecordListResponse {
        success: true,
        total: records.len(),
        records,
    }))
}
