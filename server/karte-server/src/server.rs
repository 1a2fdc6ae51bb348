use std::sync::Arc;

use dictation_service::{DictationPipeline, DifyConfig};
use error_common::{KarteError, Result};

use crate::config::ServerConfig;
use crate::export::{RecordExporter, StubSheetsExporter};
use crate::storage::{InMemoryRecordStore, RecordStore};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct KarteServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Audio to medical record pipeline
    pub pipeline: Arc<DictationPipeline>,
    /// Saved records
    pub records: Arc<dyn RecordStore>,
    /// Spreadsheet export collaborator
    pub exporter: Arc<dyn RecordExporter>,
}

impl KarteServer {
    /// Build the production state: Dify pipeline, in-memory store, stub exporter
    ///
    /// # Errors
    ///
    /// Fails when the remote workflow client cannot be constructed.
    pub fn new(config: ServerConfig, dify: &DifyConfig) -> Result<Self> {
        let pipeline = DictationPipeline::new(dify)
            .map_err(|e| KarteError::ConfigError(format!("Dictation pipeline init failed: {e}")))?;

        Ok(Self::with_components(
            config,
            Arc::new(pipeline),
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(StubSheetsExporter),
        ))
    }

    pub fn with_components(
        config: ServerConfig,
        pipeline: Arc<DictationPipeline>,
        records: Arc<dyn RecordStore>,
        exporter: Arc<dyn RecordExporter>,
    ) -> Self {
        Self {
            config,
            pipeline,
            records,
            exporter,
        }
    }
}
