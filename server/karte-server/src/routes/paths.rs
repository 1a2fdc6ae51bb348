//! Route path constants
//!
//! utoipa `#[path(...)]` attributes need string literals; keep them equal to
//! these constants.

pub const HEALTHZ: &str = "/healthz";

pub mod api {
    pub const PROCESS_AUDIO: &str = "/api/process-audio";
    pub const SAVE_RECORD: &str = "/api/save-record";
    pub const RECORDS: &str = "/api/records";
    pub const EXPORT_TO_SHEETS: &str = "/api/export-to-sheets";
}

pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
    pub const SWAGGER_UI: &str = "/swagger-ui";
}
