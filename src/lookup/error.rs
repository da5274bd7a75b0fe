//! Error types for the lookup module
//!
//! Every failure along the postal code to temperature pipeline is one of
//! these variants. Each variant knows the HTTP status and the public message
//! it surfaces as, so the server layer never has to inspect upstream details.

use thiserror::Error;

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// External collaborator a lookup talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// Postal code lookup (ViaCEP)
    Postal,
    /// Current weather (WeatherAPI)
    Weather,
}

impl Upstream {
    /// Short name used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postal => "postal",
            Self::Weather => "weather",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while resolving a temperature from a postal code
#[derive(Error, Debug)]
pub enum LookupError {
    /// Postal code is not 8 digits or is the reserved all-zero code
    #[error("invalid postal code: {input:?}")]
    InvalidPostalCode { input: String },

    /// Network-level failure calling a collaborator
    #[error("{service} request failed: {source}")]
    Transport {
        service: Upstream,
        #[source]
        source: reqwest::Error,
    },

    /// Collaborator answered with a non-success status
    #[error("{service} responded with status {status}")]
    UpstreamStatus { service: Upstream, status: u16 },

    /// Collaborator body could not be decoded
    #[error("{service} response could not be decoded: {reason}")]
    Parse { service: Upstream, reason: String },

    /// Collaborator answered but yielded no usable locality or temperature
    #[error("temperature not found")]
    NotFound,

    /// Orchestration did not finish within the deadline
    #[error("lookup deadline of {millis}ms exceeded")]
    DeadlineExceeded { millis: u128 },

    /// Unexpected failure inside the orchestration (task panic or cancellation)
    #[error("internal lookup failure: {reason}")]
    Internal { reason: String },
}

impl LookupError {
    /// Build a transport error for the given collaborator
    pub fn transport(service: Upstream, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }

    /// Build a parse error for the given collaborator
    pub fn parse(service: Upstream, reason: impl Into<String>) -> Self {
        Self::Parse {
            service,
            reason: reason.into(),
        }
    }

    /// Collaborator that caused this error, if any
    pub fn upstream(&self) -> Option<Upstream> {
        match self {
            Self::Transport { service, .. }
            | Self::UpstreamStatus { service, .. }
            | Self::Parse { service, .. } => Some(*service),
            _ => None,
        }
    }

    /// HTTP status code this error is surfaced as
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPostalCode { .. } => 422,
            Self::NotFound => 404,
            Self::DeadlineExceeded { .. } => 408,
            Self::Transport { .. }
            | Self::UpstreamStatus { .. }
            | Self::Parse { .. }
            | Self::Internal { .. } => 500,
        }
    }

    /// Message returned to the client as a JSON string
    ///
    /// Upstream details stay in the logs; the client only sees which stage
    /// failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPostalCode { .. } => "invalid zipcode",
            Self::NotFound => "can not find temperature",
            Self::DeadlineExceeded { .. } => "timeout exceeded",
            Self::Internal { .. } => "internal server error",
            Self::Transport { service, .. }
            | Self::UpstreamStatus { service, .. }
            | Self::Parse { service, .. } => match service {
                Upstream::Postal => "error getting zipcode",
                Upstream::Weather => "error getting temperature",
            },
        }
    }
}
