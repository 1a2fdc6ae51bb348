//! Voice Karte Server - consultation audio to medical record API
//!
//! HTTP surface for the clinic front-end: audio processing, record save and
//! list, and a spreadsheet export stub.

pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::{Args, ServerConfig};
pub use error::*;
pub use server::KarteServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: KarteServer) -> Router {
    routes::create_routes(server.config.max_upload_bytes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
