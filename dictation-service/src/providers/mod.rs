pub mod dify;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DifyConfig;
use crate::error::DictationResult;
use crate::record::{MedicalRecord, PatientData};

pub use dify::DifyWorkflowClient;

/// Remote service that turns a consultation recording into a medical record
#[async_trait]
pub trait WorkflowProvider: Send + Sync {
    /// Single attempt, no retries. Any error sends the pipeline to the
    /// manual-entry fallback.
    async fn transcribe(&self, audio_path: &Path, patient: &PatientData) -> DictationResult<MedicalRecord>;
}

/// Create the configured provider, or `None` when credentials are missing
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built.
pub fn create_provider(config: &DifyConfig) -> DictationResult<Option<Arc<dyn WorkflowProvider>>> {
    match config.credentials() {
        Some(_) => Ok(Some(Arc::new(DifyWorkflowClient::new(config)?))),
        None => Ok(None),
    }
}
