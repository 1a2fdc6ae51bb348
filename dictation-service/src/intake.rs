//! Upload acceptance and temporary staging of the recording.
//!
//! Acceptance is decided from the declared content type and the filename
//! only; the bytes are never inspected.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DictationError, DictationResult};

const AUDIO_MIME_PREFIX: &str = "audio/";
const OCTET_STREAM_MIME: &str = "application/octet-stream";
const WAV_EXTENSION: &str = ".wav";

/// An uploaded recording as received from the client
#[derive(Debug, Clone, Default)]
pub struct AudioUpload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Accept when the declared type is `audio/*` or `application/octet-stream`,
/// or when the filename ends in `.wav` (any case).
pub fn is_accepted_audio(filename: Option<&str>, content_type: Option<&str>) -> bool {
    let declared_audio = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .is_some_and(|essence| essence.starts_with(AUDIO_MIME_PREFIX) || essence == OCTET_STREAM_MIME);

    let wav_name = filename.is_some_and(|name| name.to_lowercase().ends_with(WAV_EXTENSION));

    declared_audio || wav_name
}

/// # Errors
///
/// Returns [`DictationError::UnsupportedFileType`] when neither the declared
/// type nor the filename marks the upload as audio.
pub fn validate_audio_upload(filename: Option<&str>, content_type: Option<&str>) -> DictationResult<()> {
    if is_accepted_audio(filename, content_type) {
        Ok(())
    } else {
        Err(DictationError::UnsupportedFileType {
            filename: filename.map(str::to_string),
            content_type: content_type.map(str::to_string),
        })
    }
}

/// Recording bytes written to a `.wav` temporary file.
///
/// The file is removed when this value is dropped, so every exit path of the
/// request (success, error, cancellation) cleans up.
#[derive(Debug)]
pub struct StagedAudio {
    file: NamedTempFile,
}

impl StagedAudio {
    /// Write `bytes` to a fresh temporary file, off the async executor.
    ///
    /// # Errors
    ///
    /// Returns [`DictationError::Staging`] when the file cannot be created or
    /// written.
    pub async fn stage(bytes: Vec<u8>) -> DictationResult<Self> {
        tokio::task::spawn_blocking(move || Self::stage_blocking(&bytes))
            .await
            .map_err(|e| DictationError::Staging(std::io::Error::other(e)))?
    }

    fn stage_blocking(bytes: &[u8]) -> DictationResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("karte-")
            .suffix(WAV_EXTENSION)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file now, reporting any failure instead of ignoring it
    ///
    /// # Errors
    ///
    /// Returns [`DictationError::Staging`] when the file cannot be deleted.
    pub fn close(self) -> DictationResult<()> {
        self.file.close()?;
        Ok(())
    }
}
