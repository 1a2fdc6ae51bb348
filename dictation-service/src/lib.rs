//! Consultation audio to structured medical record
//!
//! Turns an uploaded recording plus optional patient metadata into a
//! guaranteed well-formed ten-field [`MedicalRecord`]. Speech understanding is
//! delegated to a remote Dify workflow; this crate validates and stages the
//! upload, calls the workflow, normalises whatever comes back, and falls back
//! to a locally generated record when the workflow is not configured or fails.
//!
//! # Outcomes
//!
//! | Path | `confidence_score` | Record |
//! |------|--------------------|--------|
//! | Workflow succeeded | `0.85` | mapped from the response |
//! | Credentials missing | `0.85` | mock consultation |
//! | Workflow failed | `0.0` | manual-entry template |
//!
//! Confidence is a fixed value per path, not a measured signal.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dictation_service::{AudioUpload, DictationPipeline, DifyConfig, PatientData};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = DictationPipeline::new(&DifyConfig::from_env()?)?;
//!
//! let upload = AudioUpload {
//!     filename: Some("visit.wav".into()),
//!     content_type: Some("audio/wav".into()),
//!     bytes: std::fs::read("visit.wav")?,
//! };
//! let result = pipeline.process_upload(upload, PatientData::default()).await?;
//!
//! println!("Diagnosis: {}", result.medical_record.diagnosis);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod intake;
pub mod medical_vocabulary;
pub mod normalizer;
pub mod prompt;
pub mod providers;
pub mod record;
pub mod service;

pub use config::*;
pub use error::*;
pub use intake::*;
pub use prompt::PromptBuilder;
pub use providers::{create_provider, DifyWorkflowClient, WorkflowProvider};
pub use record::*;
pub use service::*;
