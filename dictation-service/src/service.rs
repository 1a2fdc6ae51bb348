use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use logger_redacted::PiiRedactor;
use tracing::{debug, info, warn};

use crate::config::DifyConfig;
use crate::error::DictationResult;
use crate::fallback;
use crate::intake::{validate_audio_upload, AudioUpload, StagedAudio};
use crate::providers::{create_provider, WorkflowProvider};
use crate::record::{MedicalRecord, PatientData, ProcessingResult};

/// Result of one attempt at the remote workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    Success(MedicalRecord),
    /// No provider configured; nothing was sent
    CredentialsMissing,
    /// The provider was called and failed
    RemoteError(String),
}

impl TranscriptionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            TranscriptionOutcome::Success(_) => "success",
            TranscriptionOutcome::CredentialsMissing => "credentials_missing",
            TranscriptionOutcome::RemoteError(_) => "remote_error",
        }
    }
}

/// Audio in, well-formed [`ProcessingResult`] out.
///
/// Remote failures never surface as errors; they select one of the two
/// fallback records instead. Only intake and staging can fail.
pub struct DictationPipeline {
    provider: Option<Arc<dyn WorkflowProvider>>,
    redactor: PiiRedactor,
}

impl DictationPipeline {
    /// Build the pipeline from configuration read at start-up
    ///
    /// # Errors
    ///
    /// Returns an error when the remote client cannot be constructed.
    pub fn new(config: &DifyConfig) -> DictationResult<Self> {
        let provider = create_provider(config)?;

        if provider.is_none() {
            warn!("Dify credentials not configured; process-audio will return mock records");
        } else {
            info!(api_url = %config.api_url, "Dify workflow provider configured");
        }

        Ok(Self::with_provider(provider))
    }

    pub fn with_provider(provider: Option<Arc<dyn WorkflowProvider>>) -> Self {
        Self {
            provider,
            redactor: PiiRedactor::default(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// One attempt at the remote workflow, classified
    pub async fn transcribe(&self, audio_path: &Path, patient: &PatientData) -> TranscriptionOutcome {
        let Some(provider) = &self.provider else {
            return TranscriptionOutcome::CredentialsMissing;
        };

        match provider.transcribe(audio_path, patient).await {
            Ok(record) => TranscriptionOutcome::Success(record),
            Err(e) => {
                warn!(error = %e, remote = e.is_remote(), "Workflow provider failed");
                TranscriptionOutcome::RemoteError(e.to_string())
            }
        }
    }

    /// Run the staged recording through the remote workflow or a fallback
    pub async fn process(&self, audio: &StagedAudio, patient: &PatientData) -> ProcessingResult {
        let started = Instant::now();
        let outcome = self.transcribe(audio.path(), patient).await;
        let elapsed = round_seconds(started.elapsed().as_secs_f64());

        let patient_ref = self.redactor.mask_identifier(patient.id.as_deref());
        match &outcome {
            TranscriptionOutcome::Success(_) => {
                info!(outcome = outcome.label(), patient = %patient_ref, processing_time = elapsed, "Medical record generated");
            }
            TranscriptionOutcome::CredentialsMissing => {
                info!(outcome = outcome.label(), patient = %patient_ref, "Returning mock record");
            }
            TranscriptionOutcome::RemoteError(detail) => {
                warn!(
                    outcome = outcome.label(),
                    patient = %patient_ref,
                    detail = %self.redactor.redact(detail),
                    "Returning manual-entry fallback record"
                );
            }
        }

        match outcome {
            TranscriptionOutcome::Success(record) => ProcessingResult::remote(record, elapsed),
            TranscriptionOutcome::CredentialsMissing => fallback::credentials_missing(patient, elapsed),
            TranscriptionOutcome::RemoteError(_) => fallback::remote_error(patient, elapsed),
        }
    }

    /// Validate, stage, process, then remove the staged file.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFileType` for non-audio uploads and `Staging` when
    /// the temporary file cannot be written.
    pub async fn process_upload(&self, upload: AudioUpload, patient: PatientData) -> DictationResult<ProcessingResult> {
        validate_audio_upload(upload.filename.as_deref(), upload.content_type.as_deref())?;

        debug!(
            bytes = upload.bytes.len(),
            content_type = upload.content_type.as_deref().unwrap_or("-"),
            "Staging uploaded audio"
        );
        let staged = StagedAudio::stage(upload.bytes).await?;

        let result = self.process(&staged, &patient).await;

        if let Err(e) = staged.close() {
            warn!(error = %e, "Failed to remove staged audio file");
        }

        Ok(result)
    }
}

fn round_seconds(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictationError;
    use crate::record::{RecordOrigin, AUTO_GENERATED_PATIENT_ID};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FailingProvider;

    #[async_trait]
    impl WorkflowProvider for FailingProvider {
        async fn transcribe(&self, _audio_path: &Path, _patient: &PatientData) -> DictationResult<MedicalRecord> {
            Err(DictationError::Upload {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingProvider {
        seen_path: Mutex<Option<PathBuf>>,
        fail: bool,
    }

    #[async_trait]
    impl WorkflowProvider for RecordingProvider {
        async fn transcribe(&self, audio_path: &Path, _patient: &PatientData) -> DictationResult<MedicalRecord> {
            assert!(audio_path.exists());
            *self.seen_path.lock().unwrap() = Some(audio_path.to_path_buf());
            if self.fail {
                return Err(DictationError::MissingFileId);
            }
            Ok(crate::normalizer::from_opaque_text("胃炎の疑い"))
        }
    }

    fn wav_upload(bytes: &[u8]) -> AudioUpload {
        AudioUpload {
            filename: Some("silence.wav".into()),
            content_type: Some("application/octet-stream".into()),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn missing_credentials_returns_mock_record_quickly() {
        let pipeline = DictationPipeline::new(&DifyConfig::default()).unwrap();
        assert!(!pipeline.has_remote());

        let result = pipeline.process_upload(wav_upload(b"\0\0"), PatientData::default()).await.unwrap();

        assert_eq!(result.confidence_score, 0.85);
        assert_eq!(result.origin, RecordOrigin::CredentialsMissing);
        assert!(result.processing_time < 0.1);
    }

    #[tokio::test]
    async fn remote_failure_returns_manual_entry_record() {
        let pipeline = DictationPipeline::with_provider(Some(Arc::new(FailingProvider)));
        let result = pipeline.process_upload(wav_upload(b"abc"), PatientData::default()).await.unwrap();

        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.origin, RecordOrigin::RemoteError);
        assert_eq!(result.medical_record.patient_id, AUTO_GENERATED_PATIENT_ID);
    }

    #[tokio::test]
    async fn transcribe_classifies_outcomes() {
        let audio = StagedAudio::stage(vec![1, 2, 3]).await.unwrap();
        let patient = PatientData::default();

        let none = DictationPipeline::with_provider(None);
        assert_eq!(none.transcribe(audio.path(), &patient).await, TranscriptionOutcome::CredentialsMissing);

        let failing = DictationPipeline::with_provider(Some(Arc::new(FailingProvider)));
        let outcome = failing.transcribe(audio.path(), &patient).await;
        assert_eq!(outcome.label(), "remote_error");
        assert!(matches!(outcome, TranscriptionOutcome::RemoteError(detail) if detail.contains("503")));
    }

    #[tokio::test]
    async fn success_uses_remote_confidence_and_removes_staged_file() {
        let provider = Arc::new(RecordingProvider::default());
        let pipeline = DictationPipeline::with_provider(Some(provider.clone()));

        let result = pipeline.process_upload(wav_upload(b"RIFF"), PatientData::default()).await.unwrap();

        assert_eq!(result.confidence_score, 0.85);
        assert_eq!(result.origin, RecordOrigin::Remote);
        assert!(!result.is_fallback());

        let seen = provider.seen_path.lock().unwrap().clone().unwrap();
        assert!(!seen.exists());
    }

    #[tokio::test]
    async fn staged_file_is_removed_when_remote_fails() {
        let provider = Arc::new(RecordingProvider { fail: true, ..Default::default() });
        let pipeline = DictationPipeline::with_provider(Some(provider.clone()));

        let result = pipeline.process_upload(wav_upload(b"RIFF"), PatientData::default()).await.unwrap();
        assert_eq!(result.origin, RecordOrigin::RemoteError);

        let seen = provider.seen_path.lock().unwrap().clone().unwrap();
        assert!(!seen.exists());
    }

    #[tokio::test]
    async fn non_audio_upload_is_rejected_before_staging() {
        let pipeline = DictationPipeline::with_provider(Some(Arc::new(FailingProvider)));
        let upload = AudioUpload {
            filename: Some("notes.txt".into()),
            content_type: Some("text/plain".into()),
            bytes: b"hello".to_vec(),
        };

        let err = pipeline.process_upload(upload, PatientData::default()).await.unwrap_err();
        assert!(matches!(err, DictationError::UnsupportedFileType { .. }));
    }

    #[test]
    fn processing_time_has_two_decimals() {
        assert_eq!(round_seconds(1.23456), 1.23);
        assert_eq!(round_seconds(0.004), 0.0);
    }
}
