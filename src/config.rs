//! Runtime configuration.
//!
//! Configuration comes from `TASKBOARD_*` environment variables or a JSON
//! document. Unset values fall back to the defaults below.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333/api";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default message shown when a task move is reverted.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Could not move the task; the change was reverted.";

const ENV_API_BASE_URL: &str = "TASKBOARD_API_BASE_URL";
const ENV_REQUEST_TIMEOUT_SECS: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";
const ENV_FAILURE_MESSAGE: &str = "TASKBOARD_FAILURE_MESSAGE";
const ENV_LOG_FORMAT: &str = "TASKBOARD_LOG_FORMAT";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparsable value.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    /// The base URL is not an absolute `http` or `https` URL.
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The failure message is blank.
    #[error("failure message must not be empty")]
    EmptyFailureMessage,

    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT,
                value: value.to_owned(),
            }),
        }
    }
}

/// REST API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Joins an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Resolves a stored upload path to an absolute URL.
    ///
    /// Absolute `http(s)` paths are returned unchanged. Relative paths are
    /// resolved against the server root, which is the base URL without a
    /// trailing `/api` segment. Missing or blank paths yield `None`.
    #[must_use]
    pub fn upload_url(&self, path: Option<&str>) -> Option<String> {
        let stored = path.map(str::trim).filter(|value| !value.is_empty())?;
        if stored.starts_with("http://") || stored.starts_with("https://") {
            return Some(stored.to_owned());
        }
        let base = self.base_url.trim_end_matches('/');
        let server_root = base.strip_suffix("/api").unwrap_or(base);
        if stored.starts_with('/') {
            Some(format!("{server_root}{stored}"))
        } else {
            Some(format!("{server_root}/{stored}"))
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let parsed = Url::parse(&self.base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// REST API settings.
    pub api: ApiConfig,
    /// Message carried by every failure notice.
    pub failure_message: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

impl BoardConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is unparsable or the resulting
    /// configuration is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is unparsable or the resulting
    /// configuration is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            config.api.base_url = base_url.trim().to_owned();
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            config.api.request_timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_REQUEST_TIMEOUT_SECS,
                        value: raw.clone(),
                    })?;
        }
        if let Some(message) = lookup(ENV_FAILURE_MESSAGE) {
            config.failure_message = message;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = LogFormat::try_from(raw.as_str())?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or the
    /// configuration is invalid.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value constraints.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.failure_message.trim().is_empty() {
            return Err(ConfigError::EmptyFailureMessage);
        }
        Ok(())
    }
}
