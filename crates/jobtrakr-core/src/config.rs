use std::time::Duration;

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF_SECS: u64 = 2;

/// Network settings for fetching a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait before the first retry; doubled for each one after.
    pub initial_backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
        }
    }
}

impl FetchConfig {
    /// Read configuration from environment variables.
    ///
    /// - `JOBTRAKR_FETCH_TIMEOUT_SECS` (optional, defaults to 10)
    /// - `JOBTRAKR_FETCH_MAX_ATTEMPTS` (optional, defaults to 3)
    /// - `JOBTRAKR_FETCH_BACKOFF_SECS` (optional, defaults to 2)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let timeout_secs = parse_positive(
            &lookup,
            "JOBTRAKR_FETCH_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?;
        let max_attempts = parse_positive(
            &lookup,
            "JOBTRAKR_FETCH_MAX_ATTEMPTS",
            u64::from(DEFAULT_MAX_ATTEMPTS),
        )?;
        let max_attempts = u32::try_from(max_attempts).map_err(|_| {
            AppError::ConfigError(format!(
                "JOBTRAKR_FETCH_MAX_ATTEMPTS '{max_attempts}' is too large"
            ))
        })?;

        let backoff_secs = parse_positive(
            &lookup,
            "JOBTRAKR_FETCH_BACKOFF_SECS",
            DEFAULT_BACKOFF_SECS,
        )?;

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            max_attempts,
            initial_backoff: Duration::from_secs(backoff_secs),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            let parsed: u64 = raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid {key} '{raw}': must be a positive integer"
                ))
            })?;
            if parsed == 0 {
                return Err(AppError::ConfigError(format!("{key} must be at least 1")));
            }
            Ok(parsed)
        }
    }
}
