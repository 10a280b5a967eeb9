//! Application error types.
//!
//! Only boundary failures are errors: an unreachable generator, an
//! undecodable response, a broken configuration. Content anomalies inside
//! a decoded payload are never errors. The sanitizer repairs them locally
//! so the pipeline always has something usable to merge.

use thiserror::Error;

/// Application-level errors for Meguru.
#[derive(Error, Debug)]
pub enum AppError {
    // Generator boundary
    #[error("Generator call failed: {0}")]
    Generator(String),

    #[error("Generator response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    // Domain errors
    #[error("Unknown domain: {0}")]
    DomainNotFound(String),

    #[error("Focus node not found: {0}")]
    FocusNotFound(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
