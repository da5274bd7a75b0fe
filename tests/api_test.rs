//! End-to-end tests for the HTTP API: the full router, wiremock upstreams.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cep_temperature::web::TemperatureServer;
use common::{config_for, viacep_body, weather_body};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Upstreams {
    postal: MockServer,
    weather: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            postal: MockServer::start().await,
            weather: MockServer::start().await,
        }
    }

    fn router(&self, deadline_ms: u64) -> Router {
        let config = config_for(&self.postal.uri(), &self.weather.uri(), deadline_ms);
        TemperatureServer::new(config).unwrap().build_router()
    }
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Test the reserved code is rejected
#[tokio::test]
async fn test_reserved_code_is_422() {
    let upstreams = Upstreams::start().await;

    let (status, body) = get(upstreams.router(5000), "/cep/00000000").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, r#""invalid zipcode""#);
}

/// Test a 7-digit code is rejected
#[tokio::test]
async fn test_short_code_is_422() {
    let upstreams = Upstreams::start().await;

    let (status, body) = get(upstreams.router(5000), "/cep/2525526").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, r#""invalid zipcode""#);
}

/// Test a resolvable code returns all three scales
#[tokio::test]
async fn test_success_is_200() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("01001-000", "São Paulo")))
        .mount(&upstreams.postal)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("São Paulo", 21.5, 70.7)))
        .mount(&upstreams.weather)
        .await;

    let (status, body) = get(upstreams.router(5000), "/cep/01001000").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    let c = json["temp_C"].as_f64().unwrap();
    let f = json["temp_F"].as_f64().unwrap();
    let k = json["temp_K"].as_f64().unwrap();

    assert_eq!(c, 21.5);
    assert!((f - (c * 1.8 + 32.0)).abs() < 1e-9);
    assert!((k - (c + 273.0)).abs() < 1e-9);
}

/// Test the short route form resolves the same way
#[tokio::test]
async fn test_short_route() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/25255260/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("25255-260", "Duque de Caxias")))
        .mount(&upstreams.postal)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Duque de Caxias", 30.0, 86.0)))
        .mount(&upstreams.weather)
        .await;

    let (status, body) = get(upstreams.router(5000), "/25255260").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["temp_K"], 303.0);
}

/// Test an unreachable weather API is never a success
#[tokio::test]
async fn test_weather_down_is_404() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body("25255-260", "Duque de Caxias")))
        .mount(&upstreams.postal)
        .await;

    // Weather base URL points at a port nothing listens on
    let mut config = config_for(&upstreams.postal.uri(), "http://127.0.0.1:1", 5000);
    config.upstream.request_timeout_secs = 2;
    let router = TemperatureServer::new(config).unwrap().build_router();

    let (status, body) = get(router, "/cep/25255260").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#""can not find temperature""#);
}

/// Test an unknown postal code is reported as not found
#[tokio::test]
async fn test_unknown_code_is_404() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"erro": true}"#))
        .mount(&upstreams.postal)
        .await;

    let (status, body) = get(upstreams.router(5000), "/cep/99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#""can not find temperature""#);
}

/// Test a slow upstream yields exactly one 408 response
#[tokio::test]
async fn test_deadline_is_408() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(viacep_body("01001-000", "São Paulo"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&upstreams.postal)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("São Paulo", 25.0, 77.0)))
        .mount(&upstreams.weather)
        .await;

    let (status, body) = get(upstreams.router(150), "/cep/01001000").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, r#""timeout exceeded""#);
}

/// Test the welcome page
#[tokio::test]
async fn test_home_page() {
    let upstreams = Upstreams::start().await;

    let (status, body) = get(upstreams.router(5000), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Welcome to the temperature API</h1>");
}

/// Test the health endpoint
#[tokio::test]
async fn test_health() {
    let upstreams = Upstreams::start().await;

    let (status, body) = get(upstreams.router(5000), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
