//! Two-stage temperature lookup with a shared deadline
//!
//! For each request two tasks are spawned:
//!
//! ```text
//!  locality task ──(oneshot: city name or "")──▶ temperature task ──▶ caller
//!                                                                      │
//!                                         deadline ───────────────────┘
//! ```
//!
//! The locality task resolves the postal code and hands the city name to the
//! temperature task through a one-shot channel, sending an empty string when
//! it cannot. The temperature task waits for that value, then queries the
//! weather API and yields the Celsius reading, or `0.0` when anything failed.
//! The caller races the temperature task against the deadline.
//!
//! # Known limitation
//!
//! `0.0` doubles as the "not found" sentinel, so a genuine reading of exactly
//! 0 °C is reported as not found.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::config::Config;
use crate::error::Result;

use super::convert::TemperatureReport;
use super::error::{LookupError, LookupResult};
use super::locality::LocalityResolver;
use super::postal::PostalCode;
use super::weather::TemperatureResolver;

/// Celsius value meaning "no temperature could be resolved"
pub const NOT_FOUND_CELSIUS: f64 = 0.0;

/// Default overall deadline for one lookup
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Resolves a raw postal code to a temperature report
#[derive(Debug, Clone)]
pub struct TemperatureLookup {
    locality: Arc<LocalityResolver>,
    temperature: Arc<TemperatureResolver>,
    deadline: Duration,
}

impl TemperatureLookup {
    /// Create a lookup from already built resolvers
    pub fn new(
        locality: LocalityResolver,
        temperature: TemperatureResolver,
        deadline: Duration,
    ) -> Self {
        Self {
            locality: Arc::new(locality),
            temperature: Arc::new(temperature),
            deadline,
        }
    }

    /// Build the HTTP client and both resolvers from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid and
    /// `Error::Http` if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("cep-temperature/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let locality =
            LocalityResolver::with_base_url(client.clone(), &config.upstream.postal_base_url);
        let temperature = TemperatureResolver::with_base_url(
            client,
            &config.upstream.weather_base_url,
            &config.upstream.weather_api_key,
        );

        Ok(Self::new(locality, temperature, config.deadline()))
    }

    /// Overall deadline applied to each lookup
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Resolve a raw postal code to a temperature report
    ///
    /// The deadline starts when this method is called. When it elapses the
    /// in-flight tasks are left to finish on their own and their results are
    /// dropped.
    ///
    /// # Errors
    ///
    /// - `LookupError::InvalidPostalCode` before any request is made
    /// - `LookupError::DeadlineExceeded` when the deadline elapses first
    /// - `LookupError::NotFound` when either stage produced nothing usable
    /// - `LookupError::Internal` if the temperature task panicked
    pub async fn lookup(&self, raw: &str) -> LookupResult<TemperatureReport> {
        let deadline_at = Instant::now() + self.deadline;
        let cep = PostalCode::parse(raw)?;

        let (locality_tx, locality_rx) = oneshot::channel::<String>();

        let locality = Arc::clone(&self.locality);
        tokio::spawn(async move {
            let name = match locality.resolve(&cep).await {
                Ok(record) => record.localidade,
                Err(e) => {
                    tracing::warn!(cep = %cep, error = %e, "Locality resolution failed");
                    String::new()
                }
            };
            // Receiver is gone once the caller gave up
            let _ = locality_tx.send(name);
        });

        let temperature = Arc::clone(&self.temperature);
        let temperature_task = tokio::spawn(async move {
            // A dropped sender means the locality task died: treat as unresolved
            let locality = locality_rx.await.unwrap_or_default();
            match temperature.resolve(&locality).await {
                Ok(record) => record.celsius,
                Err(e) => {
                    tracing::warn!(locality = %locality, error = %e, "Temperature resolution failed");
                    NOT_FOUND_CELSIUS
                }
            }
        });

        let celsius = match tokio::time::timeout_at(deadline_at, temperature_task).await {
            Ok(Ok(celsius)) => celsius,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Temperature task did not complete");
                return Err(LookupError::Internal {
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                tracing::warn!(
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Lookup deadline exceeded"
                );
                return Err(LookupError::DeadlineExceeded {
                    millis: self.deadline.as_millis(),
                });
            }
        };

        if celsius == NOT_FOUND_CELSIUS {
            return Err(LookupError::NotFound);
        }

        Ok(TemperatureReport::from_celsius(celsius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_lookup(deadline: Duration) -> TemperatureLookup {
        let client = Client::new();
        TemperatureLookup::new(
            LocalityResolver::with_base_url(client.clone(), "http://127.0.0.1:1"),
            TemperatureResolver::with_base_url(client, "http://127.0.0.1:1", "key"),
            deadline,
        )
    }

    #[tokio::test]
    async fn test_invalid_code_rejected_before_requests() {
        let lookup = unreachable_lookup(DEFAULT_DEADLINE);

        let err = lookup.lookup("00000000").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidPostalCode { .. }));

        let err = lookup.lookup("2525526").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidPostalCode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_postal_service_is_not_found() {
        let lookup = unreachable_lookup(DEFAULT_DEADLINE);

        let err = lookup.lookup("01001000").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = Config::default();
        assert!(TemperatureLookup::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_uses_deadline() {
        let mut config = Config::default();
        config.upstream.weather_api_key = "key".to_string();
        config.lookup.deadline_ms = 250;

        let lookup = TemperatureLookup::from_config(&config).unwrap();
        assert_eq!(lookup.deadline(), Duration::from_millis(250));
    }
}
