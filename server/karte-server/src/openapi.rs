use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::paths;
use crate::server::KarteServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::healthz,
        crate::handlers::audio::process_audio,
        crate::handlers::records::save_record,
        crate::handlers::records::list_records,
        crate::handlers::export::export_to_sheets,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::audio::ProcessAudioResponse,
            crate::handlers::audio::ProcessAudioForm,
            crate::handlers::records::SaveRecordResponse,
            crate::handlers::records::RecordListResponse,
            crate::handlers::export::ExportRequest,
            crate::export::ExportReceipt,
            crate::error::ApiErrorResponse,
            dictation_service::MedicalRecord,
            dictation_service::StoredRecord,
        )
    ),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "records", description = "Consultation audio processing and medical record management"),
    ),
    info(
        title = "Voice Karte API",
        version = "0.1.0",
        description = "Turns consultation recordings into structured ten-field medical records for clinic review.",
        license(name = "AGPL-3.0-only"),
    ),
)]
pub struct ApiDoc;

/// Swagger UI and the raw OpenAPI document
pub fn create_docs_routes() -> Router<KarteServer> {
    Router::new().merge(SwaggerUi::new(paths::docs::SWAGGER_UI).url(paths::docs::OPENAPI_JSON, ApiDoc::openapi()))
}
