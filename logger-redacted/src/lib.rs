//! Logging for the Voice Karte services with automatic patient-data redaction
//!
//! Clinic logs routinely end up holding patient identifiers: the patient id
//! typed at the front desk, the name the clinician dictated, the phone number
//! in a note. This crate installs the `tracing` subscriber for the process and
//! routes every formatted line through a [`PiiRedactor`] before it is written.
//!
//! # Detected Data Types
//!
//! - **Patient IDs**: `P-2025-001` → `PATIENT[hash]`
//! - **Phone Numbers**: `090-1234-5678` → `PHONE[hash]`
//! - **Email Addresses**: `user@example.jp` → `EMAIL[hash]`
//! - **Bearer Tokens**: `Bearer app-...` → `Bearer [REDACTED]`
//! - **Custom Patterns**: configurable `(Regex, replacement)` pairs
//!
//! Values known to identify a patient (name, id form fields) should be logged
//! through [`PiiRedactor::mask_identifier`] rather than relying on pattern
//! detection, since names have no reliable pattern.
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, LoggerConfig};
//!
//! let redactor = init_tracing(&LoggerConfig::from_env().with_verbose(true))
//!     .expect("tracing initialised once");
//! tracing::info!(patient = %redactor.mask_identifier(Some("田中太郎")), "Record saved");
//! ```

pub mod config;
pub mod formatter;
pub mod redactor;
pub mod writer;

pub use config::*;
pub use formatter::*;
pub use redactor::*;
pub use writer::*;

use std::sync::Arc;

use colored::Colorize;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Install the global subscriber described by `config`.
///
/// Returns the redactor so callers can mask identifiers explicitly with the
/// same hashing the log writer uses.
///
/// # Errors
///
/// Fails when a global subscriber has already been installed.
pub fn init_tracing(config: &LoggerConfig) -> Result<Arc<PiiRedactor>, TryInitError> {
    let redactor = Arc::new(PiiRedactor::default());
    let writer = RedactingMakeWriter::new(
        config.redaction_enabled.then(|| Arc::clone(&redactor)),
    );

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let use_colors = !config.json_output
        && std::env::var("NO_COLOR").is_err()
        && atty::is(atty::Stream::Stdout);
    colored::control::set_override(use_colors);

    if config.json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_ansi(use_colors)
                    .event_format(ColoredFormatter)
                    .with_writer(writer),
            )
            .try_init()?;
    }

    tracing::debug!(
        json_output = config.json_output,
        redaction_enabled = config.redaction_enabled,
        "Tracing initialised"
    );

    Ok(redactor)
}

/// Start-up banner for interactive consoles
pub fn print_startup_banner(service: &str) {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", format!("║  🏥 {:<57}║", service).bright_cyan());
    println!("{}", "║           Voice-to-chart clinic documentation                ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
