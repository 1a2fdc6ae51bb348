//! Dify workflow client.
//!
//! Two sequential calls per recording: a multipart file upload returning a
//! file id, then a blocking workflow run carrying that id and the prompt.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use logger_redacted::PiiRedactor;
use reqwest::{multipart, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::DifyConfig;
use crate::error::{DictationError, DictationResult};
use crate::normalizer;
use crate::prompt::PromptBuilder;
use crate::providers::WorkflowProvider;
use crate::record::{MedicalRecord, PatientData};

const UPLOAD_MIME: &str = "audio/wav";
const FALLBACK_FILE_NAME: &str = "audio.wav";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    id: Value,
}

impl UploadResponse {
    /// The service's id as text; non-string ids are kept in their JSON form
    fn file_id(self) -> Option<String> {
        match self.id {
            Value::Null => None,
            Value::String(id) if id.is_empty() => None,
            Value::String(id) => Some(id),
            other => Some(other.to_string()),
        }
    }
}

pub struct DifyWorkflowClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    user: String,
    upload_timeout: Duration,
    run_timeout: Duration,
    prompt: PromptBuilder,
    redactor: PiiRedactor,
}

impl DifyWorkflowClient {
    /// # Errors
    ///
    /// Returns [`DictationError::Config`] when the credentials are missing,
    /// or a network error when the HTTP client cannot be built.
    pub fn new(config: &DifyConfig) -> DictationResult<Self> {
        let credentials = config
            .credentials()
            .ok_or_else(|| DictationError::Config("DIFY_API_KEY and DIFY_APP_ID must be set".to_string()))?;

        let prompt = config
            .clinic_name
            .as_deref()
            .map_or_else(PromptBuilder::default, PromptBuilder::new);

        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: config.api_url.clone(),
            api_key: credentials.api_key.clone(),
            user: config.user.clone(),
            upload_timeout: config.upload_timeout,
            run_timeout: config.run_timeout,
            prompt,
            redactor: PiiRedactor::default(),
        })
    }

    /// Upload the recording and return the remote file id
    async fn upload_file(&self, audio_path: &Path) -> DictationResult<String> {
        let url = format!("{}/files/upload", self.base_url);
        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map_or_else(|| FALLBACK_FILE_NAME.to_string(), |name| name.to_string_lossy().into_owned());

        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(UPLOAD_MIME)?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("user", self.user.clone());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.upload_timeout)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(DictationError::Upload {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = serde_json::from_str(&response.text().await?)?;
        let file_id = uploaded.file_id().ok_or(DictationError::MissingFileId)?;

        tracing::debug!(file_id = %file_id, "Audio uploaded to workflow service");
        Ok(file_id)
    }

    /// Run the workflow in blocking mode and return the parsed response body
    async fn run_workflow(&self, file_id: &str, prompt: &str) -> DictationResult<Value> {
        let url = format!("{}/workflows/run", self.base_url);
        let payload = json!({
            "inputs": {
                "audio_file_id": file_id,
                "prompt": prompt,
            },
            "response_mode": "blocking",
            "user": self.user,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.run_timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(DictationError::Workflow {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WorkflowProvider for DifyWorkflowClient {
    async fn transcribe(&self, audio_path: &Path, patient: &PatientData) -> DictationResult<MedicalRecord> {
        let file_id = self.upload_file(audio_path).await?;

        let prompt = self.prompt.build(patient);
        tracing::debug!(prompt = %self.redactor.sanitize_for_logging(&prompt), "Running workflow");

        let body = self.run_workflow(&file_id, &prompt).await?;
        Ok(normalizer::normalize(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn audio_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF....WAVE").unwrap();
        file
    }

    fn client_for(server: &mockito::Server) -> DifyWorkflowClient {
        let config = DifyConfig::default()
            .with_api_url(&server.url())
            .unwrap()
            .with_credentials("app-test-key", "app-id");
        DifyWorkflowClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn structured_output_is_mapped() {
        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/files/upload")
            .match_header("authorization", "Bearer app-test-key")
            .match_body(Matcher::Regex("medical-system".to_string()))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"file-123","name":"karte.wav"}"#)
            .create_async()
            .await;
        let run = server
            .mock("POST", "/workflows/run")
            .match_header("authorization", "Bearer app-test-key")
            .match_body(Matcher::PartialJson(json!({
                "inputs": {"audio_file_id": "file-123"},
                "response_mode": "blocking",
                "user": "medical-system"
            })))
            .with_status(200)
            .with_body(r#"{"data":{"outputs":{"structured_output":{"assessment":"gastritis"}}}}"#)
            .create_async()
            .await;

        let audio = audio_file();
        let patient = PatientData {
            id: Some("P-2025-001".into()),
            ..Default::default()
        };
        let record = client_for(&server).transcribe(audio.path(), &patient).await.unwrap();

        assert_eq!(record.diagnosis, "gastritis");
        assert_eq!(record.patient_id, "AUTO-GENERATED");
        upload.assert_async().await;
        run.assert_async().await;
    }

    #[tokio::test]
    async fn upload_failure_skips_workflow_run() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let run = server
            .mock("POST", "/workflows/run")
            .expect(0)
            .create_async()
            .await;

        let audio = audio_file();
        let err = client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DictationError::Upload { status: 500, .. }));
        assert!(err.is_remote());
        run.assert_async().await;
    }

    #[tokio::test]
    async fn upload_without_id_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let audio = audio_file();
        let err = client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DictationError::MissingFileId));
    }

    #[tokio::test]
    async fn numeric_file_id_is_passed_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(201)
            .with_body(r#"{"id":42}"#)
            .create_async()
            .await;
        let run = server
            .mock("POST", "/workflows/run")
            .match_body(Matcher::PartialJson(json!({"inputs": {"audio_file_id": "42"}})))
            .with_status(200)
            .with_body(r#"{"data":{"outputs":{}}}"#)
            .create_async()
            .await;

        let audio = audio_file();
        client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap();
        run.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_workflow_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(200)
            .with_body(r#"{"id":"f1"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/workflows/run")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>502 Bad Gateway</html>")
            .create_async()
            .await;

        let audio = audio_file();
        let err = client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DictationError::Serialization(_)));
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn workflow_non_200_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(200)
            .with_body(r#"{"id":"file-1"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/workflows/run")
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let audio = audio_file();
        let err = client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DictationError::Workflow { status: 201, .. }));
    }

    #[tokio::test]
    async fn unstructured_output_becomes_notes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/files/upload")
            .with_status(200)
            .with_body(r#"{"id":"file-1"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/workflows/run")
            .with_status(200)
            .with_body(r#"{"data":{"outputs":{"text":"胃炎"}}}"#)
            .create_async()
            .await;

        let audio = audio_file();
        let record = client_for(&server)
            .transcribe(audio.path(), &PatientData::default())
            .await
            .unwrap();
        assert!(record.notes.starts_with("Dify処理結果: "));
        assert!(record.present_illness.contains("胃炎"));
    }

    #[test]
    fn client_requires_credentials() {
        assert!(matches!(
            DifyWorkflowClient::new(&DifyConfig::default()),
            Err(DictationError::Config(_))
        ));
    }
}
