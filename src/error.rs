//! Unified error handling for the cep-temperature crate
//!
//! Domain errors live next to their module ([`LookupError`] in `lookup`,
//! [`ServerError`] in `web`); this module wraps them in a single [`Error`]
//! so they can cross module boundaries with `?`.

use std::io;
use thiserror::Error;

pub use crate::lookup::error::{LookupError, Upstream};
pub use crate::web::ServerError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad client input
    Input,
    /// External collaborator failures (transport, status, decoding)
    Upstream,
    /// Deadline elapsed
    Timeout,
    /// Configuration and startup errors
    Config,
    /// Anything else
    Other,
}

/// Unified error type for the cep-temperature crate
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup pipeline errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Lookup(e) => match e {
                LookupError::InvalidPostalCode { .. } => ErrorCategory::Input,
                LookupError::DeadlineExceeded { .. } => ErrorCategory::Timeout,
                LookupError::Transport { .. }
                | LookupError::UpstreamStatus { .. }
                | LookupError::Parse { .. }
                | LookupError::NotFound => ErrorCategory::Upstream,
                LookupError::Internal { .. } => ErrorCategory::Other,
            },
            Self::Http(_) => ErrorCategory::Upstream,
            Self::Config(_) | Self::Server(ServerError::ConfigError(_)) => ErrorCategory::Config,
            Self::Server(_) | Self::Io(_) | Self::Json(_) => ErrorCategory::Other,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
