use clap::Parser;
use colored::Colorize;
use tracing::info;

use dictation_service::DifyConfig;
use error_common::{KarteError, Result};
use karte_server::{create_app, Args, KarteServer, ServerConfig};
use logger_redacted::{init_tracing, print_startup_banner, LoggerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let logger_config = LoggerConfig::from_env()
        .with_verbose(args.verbose)
        .with_json_output(args.json_logs);
    init_tracing(&logger_config)
        .map_err(|e| KarteError::ConfigError(format!("Tracing init failed: {e}")))?;

    if !logger_config.json_output {
        print_startup_banner("Voice Karte Server");
    }

    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let dify = DifyConfig::from_env().map_err(|e| KarteError::ConfigError(e.to_string()))?;
    let server = KarteServer::new(ServerConfig::from(&args), &dify)?;
    let app = create_app(server);

    let bind = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| KarteError::NetworkError(format!("Failed to bind to {bind}: {e}")))?;

    info!("🚀 {}", format!("Voice Karte server running on http://{bind}").bright_green());
    info!("📋 {}", format!("Health check available at: http://{bind}/healthz").bright_blue());
    info!("📖 {}", format!("API docs available at: http://{bind}/swagger-ui").bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| KarteError::ServerError(format!("HTTP server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
