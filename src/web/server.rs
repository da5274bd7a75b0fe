//! Temperature server implementation
//!
//! Owns the shared application state, wires the router with its middleware
//! and runs it on a TCP listener.

use std::any::Any;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerConfig};
use crate::lookup::TemperatureLookup;

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Postal code to temperature lookup
    pub lookup: TemperatureLookup,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state around an existing lookup
    pub fn new(lookup: TemperatureLookup) -> Self {
        Self {
            lookup,
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Temperature Server
// ============================================================================

/// HTTP server exposing the temperature lookup
pub struct TemperatureServer {
    config: Config,
    state: AppState,
}

impl TemperatureServer {
    /// Create a new server, validating the configuration
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let lookup = TemperatureLookup::from_config(&config)
            .map_err(|e| ServerError::InitError(e.to_string()))?;

        Ok(Self {
            state: AppState::new(lookup),
            config,
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        with_middleware(create_router(self.state.clone()), &self.config.server)
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending::<()>()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.server.bind_address;

        tracing::info!(%addr, "Starting temperature server");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Temperature server shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.server.bind_address,
            deadline_ms: self.config.lookup.deadline_ms,
            request_timeout_secs: self.config.upstream.request_timeout_secs,
            cors_enabled: self.config.server.enable_cors,
            request_logging_enabled: self.config.server.enable_request_logging,
        }
    }
}

/// Wrap a router with panic recovery, CORS and request tracing
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let mut router = router.layer(CatchPanicLayer::custom(handle_panic));

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        );
    }

    if config.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Turn a handler panic into a 500 JSON string response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json("internal server error"),
    )
        .into_response()
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub deadline_ms: u64,
    pub request_timeout_secs: u64,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Temperature Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Lookup Deadline: {}ms\n\
             Upstream Timeout: {}s\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.deadline_ms,
            self.request_timeout_secs,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Configuration error
    ConfigError(String),

    /// Initialization error
    InitError(String),

    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::InitError(msg) => write!(f, "Initialization error: {}", msg),
            Self::BindError(msg) => write!(f, "Failed to bind: {}", msg),
            Self::ServeError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

// ============================================================================
// Tests
// ============================================================================
