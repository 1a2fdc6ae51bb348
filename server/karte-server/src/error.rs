use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dictation_service::DictationError;
use error_common::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type/code
    #[schema(example = "invalid_file_type")]
    pub error_type: String,
    /// Stable error code
    #[schema(example = "INTAKE_1002")]
    pub error_code: String,
    /// Localized message shown to the clinician
    #[schema(example = "音声ファイルのみアップロード可能です")]
    pub detail: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("音声ファイルのみアップロード可能です")]
    InvalidFileType,

    #[error("音声ファイルが指定されていません")]
    MissingAudioFile,

    #[error("{message}")]
    BadRequest { message: String },

    #[error("医療記録の形式が正しくありません: {0}")]
    InvalidRecord(String),

    #[error("音声処理中にエラーが発生しました: {0}")]
    Processing(String),

    #[error("記録保存中にエラーが発生しました: {0}")]
    Save(String),

    #[error("エクスポート中にエラーが発生しました: {0}")]
    Export(String),

    #[error("記録の取得中にエラーが発生しました: {0}")]
    Load(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileType | ApiError::MissingAudioFile | ApiError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Processing(_) | ApiError::Save(_) | ApiError::Export(_) | ApiError::Load(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable code shared with the log lines
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidFileType => ErrorCode::UNSUPPORTED_FILE_TYPE,
            ApiError::MissingAudioFile => ErrorCode::MISSING_AUDIO_FILE,
            ApiError::BadRequest { .. } | ApiError::InvalidRecord(_) => ErrorCode::INVALID_INPUT,
            ApiError::Processing(_) | ApiError::Export(_) => ErrorCode::INTERNAL,
            ApiError::Save(_) => ErrorCode::STORAGE_WRITE_FAILED,
            ApiError::Load(_) => ErrorCode::STORAGE_READ_FAILED,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidFileType => "invalid_file_type",
            ApiError::MissingAudioFile => "missing_audio_file",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::InvalidRecord(_) => "invalid_record",
            ApiError::Processing(_) => "processing_error",
            ApiError::Save(_) => "save_error",
            ApiError::Export(_) => "export_error",
            ApiError::Load(_) => "load_error",
        }
    }
}

impl From<DictationError> for ApiError {
    fn from(err: DictationError) -> Self {
        match err {
            DictationError::UnsupportedFileType { .. } => ApiError::InvalidFileType,
            other => ApiError::Processing(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = self.error_code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = self.error_code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            error_code: self.error_code().to_string(),
            detail: self.to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}
