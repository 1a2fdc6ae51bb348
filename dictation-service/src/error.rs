use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported file type (filename: {filename:?}, content type: {content_type:?})")]
    UnsupportedFileType {
        filename: Option<String>,
        content_type: Option<String>,
    },

    #[error("Audio staging error: {0}")]
    Staging(#[from] std::io::Error),

    #[error("File upload failed with status {status}: {body}")]
    Upload { status: u16, body: String },

    #[error("Upload response did not contain a file id")]
    MissingFileId,

    #[error("Workflow run failed with status {status}: {body}")]
    Workflow { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DictationError {
    /// Failures of the remote workflow service, which the pipeline absorbs
    /// into a fallback record instead of surfacing to the caller
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            DictationError::Upload { .. }
                | DictationError::MissingFileId
                | DictationError::Workflow { .. }
                | DictationError::Network(_)
                | DictationError::Serialization(_)
        )
    }
}

pub type DictationResult<T> = Result<T, DictationError>;
