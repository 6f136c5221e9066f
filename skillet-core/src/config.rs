//! Environment-backed configuration.
//!
//! Every credential the pipeline needs is read once at startup so a
//! missing or malformed value fails fast instead of surfacing mid-request.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PHOTO_BASE_URL: &str = "https://api.pexels.com/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_organization: Option<String>,
    pub model: String,
    pub completion_base_url: String,
    pub pexels_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub photo_base_url: String,
    /// Directory the file-backed state store writes under.
    pub state_dir: PathBuf,
    /// Upper bound on any single outbound HTTP request.
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = require("OPENAI_API_KEY")?;
        validate_openai_key(&openai_api_key)?;
        let supabase_url = require("SUPABASE_URL")?;
        validate_base_url("SUPABASE_URL", &supabase_url)?;

        let http_timeout = match optional("SKILLET_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    var: "SKILLET_HTTP_TIMEOUT_SECS",
                    reason: format!("expected a whole number of seconds, got '{raw}'"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Config {
            openai_api_key,
            openai_organization: optional("OPENAI_ORGANIZATION"),
            model: optional("SKILLET_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_base_url: optional("SKILLET_COMPLETION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            pexels_api_key: require("PEXELS_API_KEY")?,
            supabase_url,
            supabase_anon_key: require("SUPABASE_ANON_KEY")?,
            photo_base_url: optional("SKILLET_PHOTO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PHOTO_BASE_URL.to_string()),
            state_dir: optional("SKILLET_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_state_dir),
            http_timeout,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    match optional(name) {
        Some(value) => Ok(value),
        None => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn validate_openai_key(key: &str) -> Result<(), ConfigError> {
    if key.starts_with("sk-") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            var: "OPENAI_API_KEY",
            reason: "expected a key starting with 'sk-'".to_string(),
        })
    }
}

fn validate_base_url(var: &'static str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            var,
            reason: format!("expected an http(s) URL, got '{url}'"),
        })
    }
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skillet")
        .join("state")
}
