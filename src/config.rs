//! Service configuration parsed from environment variables.
//!
//! Every knob has a default; missing or malformed values fall back to it
//! rather than aborting startup.

use rectscan_parser::Limits;
use rectscan_parser::limits::{
    DEFAULT_MAX_DIMENSION, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_RECTANGLES, DEFAULT_PARSE_TIMEOUT_MS,
    is_valid_dimension,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PARSE_RETRIES: usize = 2;
pub const DEFAULT_PARSE_RETRY_BASE_MS: u64 = 50;

/// How often a transient parse failure is retried, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below 1.
    pub attempts: usize,
    /// Linear backoff step: attempt `n` waits `n * base_ms` before the next.
    pub base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_PARSE_RETRIES, base_ms: DEFAULT_PARSE_RETRY_BASE_MS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub limits: Limits,
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `PARSER_MAX_FILE_SIZE_BYTES`: default 5 MiB
    /// - `PARSER_MAX_RECTANGLES`: default 10000
    /// - `PARSER_MAX_DIMENSION`: default 100000
    /// - `PARSER_TIMEOUT_MS`: default 5000
    /// - `PARSE_RETRIES`: total attempts for transient failures, default 2
    /// - `PARSE_RETRY_BASE_MS`: default 50
    #[must_use]
    pub fn from_env() -> Self {
        let limits = Limits {
            max_file_size_bytes: env_parse("PARSER_MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES),
            max_rectangles: env_parse("PARSER_MAX_RECTANGLES", DEFAULT_MAX_RECTANGLES),
            max_dimension: Some(env_parse("PARSER_MAX_DIMENSION", DEFAULT_MAX_DIMENSION))
                .filter(|v| is_valid_dimension(*v))
                .unwrap_or(DEFAULT_MAX_DIMENSION),
            parse_timeout_ms: env_parse("PARSER_TIMEOUT_MS", DEFAULT_PARSE_TIMEOUT_MS),
        };
        let retry = RetryPolicy {
            attempts: env_parse("PARSE_RETRIES", DEFAULT_PARSE_RETRIES).max(1),
            base_ms: env_parse("PARSE_RETRY_BASE_MS", DEFAULT_PARSE_RETRY_BASE_MS),
        };

        Self { port: env_parse("PORT", DEFAULT_PORT), limits, retry }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
