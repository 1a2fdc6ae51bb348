use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use dictation_service::{validate_audio_upload, AudioUpload, MedicalRecord, PatientData, ProcessingResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse};
use crate::server::KarteServer;

const AUDIO_FIELD: &str = "audio_file";

/// Processing result returned to the front-end
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessAudioResponse {
    pub success: bool,
    pub medical_record: MedicalRecord,
    /// Fixed per path: 0.85 for workflow or mock records, 0.0 after a workflow failure
    #[schema(example = 0.85)]
    pub confidence_score: f64,
    /// Seconds, two decimals
    #[schema(example = 3.42)]
    pub processing_time: f64,
}

impl From<ProcessingResult> for ProcessAudioResponse {
    fn from(result: ProcessingResult) -> Self {
        Self {
            success: true,
            medical_record: result.medical_record,
            confidence_score: result.confidence_score,
            processing_time: result.processing_time,
        }
    }
}

/// Multipart form accepted by `process-audio`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProcessAudioForm {
    #[schema(value_type = String, format = Binary)]
    audio_file: Vec<u8>,
    patient_name: Option<String>,
    patient_id: Option<String>,
    patient_age: Option<String>,
    patient_gender: Option<String>,
}

/// Convert a consultation recording into a medical record
#[utoipa::path(
    post,
    path = "/api/process-audio",
    tag = "records",
    request_body(content = ProcessAudioForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Medical record generated (possibly a fallback)", body = ProcessAudioResponse),
        (status = 400, description = "Missing or non-audio file", body = ApiErrorResponse),
        (status = 500, description = "Unexpected processing failure", body = ApiErrorResponse)
    )
)]
pub async fn process_audio(
    State(server): State<KarteServer>,
    mut multipart: Multipart,
) -> Result<Json<ProcessAudioResponse>, ApiError> {
    let mut upload: Option<AudioUpload> = None;
    let (mut name, mut id, mut age, mut gender) = (None, None, None, None);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("フォームデータの読み込みに失敗しました: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            AUDIO_FIELD => upload = Some(read_audio_field(field).await?),
            "patient_name" => name = Some(read_text_field(field).await?),
            "patient_id" => id = Some(read_text_field(field).await?),
            "patient_age" => age = Some(read_text_field(field).await?),
            "patient_gender" => gender = Some(read_text_field(field).await?),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    let upload = upload.ok_or(ApiError::MissingAudioFile)?;
    let patient = PatientData::from_form(name, id, age, gender);

    let result = server.pipeline.process_upload(upload, patient).await?;

    Ok(Json(result.into()))
}

/// Reject non-audio uploads before buffering the body
async fn read_audio_field(field: Field<'_>) -> Result<AudioUpload, ApiError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    validate_audio_upload(filename.as_deref(), content_type.as_deref())?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(format!("音声ファイルの読み込みに失敗しました: {e}")))?;

    Ok(AudioUpload {
        filename,
        content_type,
        bytes: bytes.to_vec(),
    })
}

async fn read_text_field(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("フォームデータの読み込みに失敗しました: {e}")))
}
