use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{DictationError, DictationResult};

pub const DEFAULT_API_URL: &str = "https://api.dify.ai/v1";
pub const DEFAULT_USER: &str = "medical-system";
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 60;

/// Remote workflow service configuration, read once at start-up
#[derive(Debug, Clone)]
pub struct DifyConfig {
    /// Base URL without a trailing slash
    pub api_url: String,
    pub api_key: Option<SecretString>,
    pub app_id: Option<String>,
    /// Logical user tag sent with every call
    pub user: String,
    pub upload_timeout: Duration,
    pub run_timeout: Duration,
    /// Overrides the clinic named in the prompt persona
    pub clinic_name: Option<String>,
}

/// Bearer credential and application id, both present and non-empty
#[derive(Debug, Clone, Copy)]
pub struct DifyCredentials<'a> {
    pub api_key: &'a SecretString,
    pub app_id: &'a str,
}

impl Default for DifyConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            app_id: None,
            user: DEFAULT_USER.to_string(),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            run_timeout: Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS),
            clinic_name: None,
        }
    }
}

impl DifyConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`DictationError::Config`] when `DIFY_API_URL` is not a valid
    /// URL or a timeout is not a whole number of seconds.
    pub fn from_env() -> DictationResult<Self> {
        let api_url = std::env::var("DIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let upload_timeout = timeout_from_env("DIFY_UPLOAD_TIMEOUT_SECS", DEFAULT_UPLOAD_TIMEOUT_SECS)?;
        let run_timeout = timeout_from_env("DIFY_RUN_TIMEOUT_SECS", DEFAULT_RUN_TIMEOUT_SECS)?;

        let user = non_empty_var("DIFY_USER").unwrap_or_else(|| DEFAULT_USER.to_string());

        Ok(Self {
            api_url: normalize_base_url(&api_url)?,
            api_key: non_empty_var("DIFY_API_KEY").map(SecretString::new),
            app_id: non_empty_var("DIFY_APP_ID"),
            user,
            upload_timeout,
            run_timeout,
            clinic_name: non_empty_var("KARTE_CLINIC_NAME"),
        })
    }

    /// Both credentials, or `None` when either is unset or blank
    pub fn credentials(&self) -> Option<DifyCredentials<'_>> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())?;
        let app_id = self.app_id.as_deref().filter(|id| !id.trim().is_empty())?;

        Some(DifyCredentials { api_key, app_id })
    }

    /// # Errors
    ///
    /// Returns [`DictationError::Config`] when `api_url` is not a valid URL.
    pub fn with_api_url(mut self, api_url: &str) -> DictationResult<Self> {
        self.api_url = normalize_base_url(api_url)?;
        Ok(self)
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>, app_id: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self.app_id = Some(app_id.into());
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn timeout_from_env(key: &str, default_secs: u64) -> DictationResult<Duration> {
    match non_empty_var(key) {
        None => Ok(Duration::from_secs(default_secs)),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| DictationError::Config(format!("{key} must be a whole number of seconds, got {raw:?}"))),
    }
}

fn normalize_base_url(raw: &str) -> DictationResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed)
        .map_err(|e| DictationError::Config(format!("Invalid DIFY_API_URL {trimmed:?}: {e}")))?;
    Ok(trimmed.to_string())
}
