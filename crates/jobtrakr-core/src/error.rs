use thiserror::Error;

/// Application-wide error types for jobtrakr.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Fetched markup could not be scanned.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Why a fetch did not produce a usable page.
///
/// This is the failure arm of a [`FetchOutcome`](crate::models::FetchOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Every attempt timed out.
    #[error("Request timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    /// DNS, connection, TLS, or body-read failure.
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived with a status other than 200.
    #[error("Unexpected HTTP status {0}")]
    NonOkStatus(u16),
}

impl FetchError {
    /// Returns true if this error is transient and worth retrying.
    ///
    /// Only timeouts are retried; status errors and other network failures
    /// end the fetch immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
