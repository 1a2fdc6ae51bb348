use thiserror::Error;

use crate::codes::{storage, system};

/// Simplified error enum shared across the Voice Karte crates
#[derive(Error, Debug)]
pub enum KarteError {
    /// Network communication errors (bind failures, outbound transport)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Record store failures
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KarteError {
    /// Stable error code for API bodies and logs
    pub fn code(&self) -> &'static str {
        match self {
            KarteError::NetworkError(_) => system::NETWORK,
            KarteError::ServerError(_) => system::INTERNAL,
            KarteError::StorageError(_) => storage::WRITE_FAILED,
            KarteError::ConfigError(_) => system::CONFIGURATION,
        }
    }
}

/// Result type alias for Voice Karte operations
pub type Result<T> = std::result::Result<T, KarteError>;

/// Log an error with the context it surfaced in
pub fn log_error(context: &str, error: &KarteError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Voice Karte error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_carry_storage_code() {
        let err = KarteError::StorageError("lock poisoned".to_string());
        assert_eq!(err.code(), "STORAGE_3001");
        assert_eq!(err.to_string(), "Storage error: lock poisoned");
    }

    #[test]
    fn startup_errors_carry_system_codes() {
        let err = KarteError::ConfigError("bad DIFY_API_URL".to_string());
        assert_eq!(err.code(), "SYSTEM_9001");

        let err = KarteError::NetworkError("address in use".to_string());
        assert_eq!(err.code(), "SYSTEM_9003");
    }
}
