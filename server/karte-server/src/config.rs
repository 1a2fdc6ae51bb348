use clap::Parser;

/// Default request body limit for audio uploads (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Voice Karte HTTP Server
#[derive(Parser, Debug, Clone)]
#[command(name = "karte-server")]
#[command(about = "Consultation audio to structured medical record API server")]
pub struct Args {
    /// Server bind address
    #[arg(long, env = "KARTE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "KARTE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON log lines instead of colored console output
    #[arg(long)]
    pub json_logs: bool,

    /// Largest accepted request body in bytes
    #[arg(long, env = "KARTE_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

/// Settings the router needs at construction time
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}
