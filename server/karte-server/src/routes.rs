pub mod paths;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{audio, export, health, records},
    openapi,
    server::KarteServer,
};

/// Health check route
pub fn health_routes() -> Router<KarteServer> {
    Router::new().route(paths::HEALTHZ, get(health::healthz))
}

/// Audio upload route with the raised body limit
pub fn audio_routes(max_upload_bytes: usize) -> Router<KarteServer> {
    Router::new()
        .route(paths::api::PROCESS_AUDIO, post(audio::process_audio))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Record save, list and export routes
pub fn record_routes() -> Router<KarteServer> {
    Router::new()
        .route(paths::api::SAVE_RECORD, post(records::save_record))
        .route(paths::api::RECORDS, get(records::list_records))
        .route(paths::api::EXPORT_TO_SHEETS, post(export::export_to_sheets))
}

/// Create all application routes
pub fn create_routes(max_upload_bytes: usize) -> Router<KarteServer> {
    Router::new()
        .merge(health_routes())
        .merge(audio_routes(max_upload_bytes))
        .merge(record_routes())
        .merge(openapi::create_docs_routes())
}
