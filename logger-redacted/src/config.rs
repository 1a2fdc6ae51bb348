// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Pass every formatted line through the PII redactor before it is written
    pub redaction_enabled: bool,
    /// Emit JSON lines instead of colored development output
    pub json_output: bool,
    /// Default level for the service crates when `RUST_LOG` is unset
    pub log_level: String,
    /// Crate targets the default level applies to
    pub targets: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            json_output: false,
            log_level: "info".to_string(),
            targets: vec![
                "karte_server".to_string(),
                "dictation_service".to_string(),
            ],
        }
    }
}

impl LoggerConfig {
    /// Development defaults overridden by `LOG_FORMAT`, `LOG_REDACTION` and `KARTE_ENV`
    pub fn from_env() -> Self {
        let production = std::env::var("KARTE_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let json_output = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(production);

        let redaction_enabled = std::env::var("LOG_REDACTION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        Self {
            redaction_enabled,
            json_output,
            ..Self::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = self.json_output || json_output;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        let mut directives: Vec<String> = self
            .targets
            .iter()
            .map(|target| format!("{}={}", target, self.log_level))
            .collect();
        directives.push("tower_http=info".to_string());
        directives.push("reqwest=info".to_string());
        directives.join(",")
    }
}
