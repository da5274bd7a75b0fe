//! REST API handlers for the temperature service
//!
//! This module defines the API routes and handlers, and how lookup errors
//! become HTTP responses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::lookup::LookupError;

use super::server::AppState;

/// Body of `GET /`
pub const WELCOME_PAGE: &str = "<h1>Welcome to the temperature API</h1>";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// ============================================================================
// Error Mapping
// ============================================================================

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Lookup failed");
        } else {
            tracing::info!(error = %self, status = status.as_u16(), "Lookup rejected");
        }

        (status, Json(self.public_message())).into_response()
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/cep/{cep}", get(get_temperature))
        .route("/{cep}", get(get_temperature))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Static welcome page
async fn home() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Resolve the current temperature for a postal code
async fn get_temperature(State(state): State<AppState>, Path(cep): Path<String>) -> Response {
    match state.lookup.lookup(&cep).await {
        Ok(report) => {
            tracing::info!(
                cep = %cep,
                temp_c = report.celsius,
                temp_f = report.fahrenheit,
                temp_k = report.kelvin,
                "Temperature resolved"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// Tests
// ============================================================================
