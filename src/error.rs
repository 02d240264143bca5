//! Error types for metalctl
//!
//! This module defines the error handling strategy for metalctl. There are two
//! error types: `MetalctlError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `MetalctlError`.
//! The CLI boundary (`main.rs`) keeps the typed error all the way to the
//! exit: `exit_codes::exit_code_for_error` needs the variant, not a string,
//! to pick the process exit code, so errors are displayed and mapped there
//! rather than erased into an opaque wrapper.
//!
//! ## Failure Severity
//!
//! Not every API failure is fatal. A failed device listing ends the run for
//! that project; a failed usage lookup degrades to a zero cost; a failed
//! delete is recorded as that device's outcome (see `DeleteOutcome` in
//! `src/types.rs`) and never raised as an error at all. The variants here
//! cover the cases that do propagate as errors.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: configuration parsing and validation issues
//!   - Automatically converted to `MetalctlError::Config` via `#[from]`
//!
//! - `Transport`: connection-level faults (refused, timeout, TLS)
//!   - Carries the operation name so messages identify what was in flight
//!
//! - `Api`: the provider answered with a non-2xx status
//!   - Carries the status code and the response body verbatim

use thiserror::Error;

/// Main error type for metalctl
#[derive(Error, Debug)]
pub enum MetalctlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error during {operation}: {message}")]
    Transport {
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("API error during {operation}: HTTP {status} - {body}")]
    Api {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown project: {0} (not in the configured project table)")]
    UnknownProject(String),

    #[error("No API token configured (set --token, METAL_AUTH_TOKEN, or api.token in the config file)")]
    MissingToken,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MetalctlError>;

impl MetalctlError {
    /// Build a `Transport` error from a reqwest failure, tagged with the
    /// operation that was in flight.
    pub fn transport(operation: impl Into<String>, err: reqwest::Error) -> Self {
        MetalctlError::Transport {
            operation: operation.into(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
