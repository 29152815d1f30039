use thiserror::Error;

/// Failure of a repository API request
///
/// Surfaced to users as a single "analysis failed" condition; the variant only
/// refines the log message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid request URL: {message}")]
    InvalidUrl { message: String },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Status { status: 403 | 429, .. })
    }
}
