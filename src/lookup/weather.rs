//! Current temperature resolution through WeatherAPI
//!
//! `GET {base}/v1/current.json?q={locality}&key={api_key}`; only
//! `current.temp_c` is consumed.

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::error::{LookupError, LookupResult, Upstream};

/// Public WeatherAPI endpoint
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weatherapi.com";

const CURRENT_PATH: &str = "/v1/current.json";

/// Current temperature as reported upstream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRecord {
    /// Celsius
    pub celsius: f64,
    /// Fahrenheit as reported upstream; recomputed locally for the report
    pub fahrenheit: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
    temp_f: f64,
}

impl From<CurrentWeatherResponse> for TemperatureRecord {
    fn from(response: CurrentWeatherResponse) -> Self {
        Self {
            celsius: response.current.temp_c,
            fahrenheit: response.current.temp_f,
        }
    }
}

/// Client for the current weather API
#[derive(Clone)]
pub struct TemperatureResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for TemperatureResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemperatureResolver")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TemperatureResolver {
    /// Create a resolver against the public WeatherAPI endpoint
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, DEFAULT_WEATHER_BASE_URL, api_key)
    }

    /// Create a resolver against a custom base URL
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Build the request URL, form-encoding the locality and the key
    pub fn endpoint(&self, locality: &str) -> LookupResult<Url> {
        let raw = format!("{}{}", self.base_url, CURRENT_PATH);
        Url::parse_with_params(&raw, &[("q", locality), ("key", self.api_key.as_str())]).map_err(
            |e| LookupError::Internal {
                reason: format!("invalid weather endpoint {raw}: {e}"),
            },
        )
    }

    /// Resolve the current temperature for a city name
    ///
    /// An empty locality means the postal lookup found nothing; no request
    /// is made in that case.
    ///
    /// # Errors
    ///
    /// - `LookupError::NotFound` for an empty locality
    /// - `LookupError::Transport` if the request cannot be sent or the body read
    /// - `LookupError::UpstreamStatus` on a non-success status
    /// - `LookupError::Parse` if the body has no `current.temp_c`
    pub async fn resolve(&self, locality: &str) -> LookupResult<TemperatureRecord> {
        if locality.trim().is_empty() {
            tracing::debug!("Empty locality, skipping weather lookup");
            return Err(LookupError::NotFound);
        }

        let url = self.endpoint(locality)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::transport(Upstream::Weather, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::transport(Upstream::Weather, e))?;

        if !status.is_success() {
            tracing::warn!(
                locality = %locality,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Weather lookup returned error status"
            );
            return Err(LookupError::UpstreamStatus {
                service: Upstream::Weather,
                status: status.as_u16(),
            });
        }

        let parsed: CurrentWeatherResponse = serde_json::from_slice(&body)
            .map_err(|e| LookupError::parse(Upstream::Weather, e.to_string()))?;
        let record = TemperatureRecord::from(parsed);

        tracing::info!(
            locality = %locality,
            temp_c = record.celsius,
            temp_f = record.fahrenheit,
            "Weather lookup resolved"
        );

        Ok(record)
    }
}
