//! Configuration management for codeviz
//!
//! Settings are loaded from environment variables with defaults. CLI flags
//! override individual values after loading.
//!
//! # Environment Variables
//!
//! - `CODEVIZ_API_BASE`: GitHub REST API root - default: "https://api.github.com"
//! - `CODEVIZ_GITHUB_TOKEN`: Bearer token, falls back to `GITHUB_TOKEN` - default: unset
//! - `CODEVIZ_REQUEST_TIMEOUT`: Timeout in seconds - default: "30"
//! - `CODEVIZ_MAX_DEPTH`: Graph depth limit while no search is active - default: "4"
//! - `CODEVIZ_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use codeviz::CodevizConfig;
//!
//! let config = CodevizConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::layout::DEFAULT_MAX_DEPTH;
use crate::util::logging::level_from_str;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct CodevizConfig {
    /// Root of the GitHub REST API
    pub api_base: String,

    /// Token sent as `Authorization: Bearer`; raises the anonymous rate limit
    pub github_token: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Graph depth limit applied while no search query is active
    pub max_depth: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for CodevizConfig {
    fn default() -> Self {
        let api_base =
            env::var("CODEVIZ_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let github_token = env::var("CODEVIZ_GITHUB_TOKEN")
            .or_else(|_| env::var("GITHUB_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty());

        let request_timeout_secs = env::var("CODEVIZ_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_depth = env::var("CODEVIZ_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DEPTH);

        let log_level = env::var("CODEVIZ_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            api_base,
            github_token,
            request_timeout_secs,
            max_depth,
            log_level,
        }
    }
}

impl CodevizConfig {
    /// Checks numeric ranges, the API base scheme and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "CODEVIZ_API_BASE '{}' is not an http(s) URL",
                self.api_base
            )));
        }

        if level_from_str(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}

impl fmt::Display for CodevizConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Codeviz Configuration:")?;
        writeln!(f, "  API Base: {}", self.api_base)?;
        writeln!(
            f,
            "  GitHub Token: {}",
            if self.github_token.is_some() { "set" } else { "not set" }
        )?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
