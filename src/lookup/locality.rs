//! Locality resolution through the ViaCEP postal lookup API
//!
//! `GET {base}/ws/{cep}/json/` answers with the address of a postal code.
//! Only `localidade` (the city) is used downstream; the other fields are
//! carried through untouched.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{LookupError, LookupResult, Upstream};
use super::postal::PostalCode;

/// Public ViaCEP endpoint
pub const DEFAULT_POSTAL_BASE_URL: &str = "http://viacep.com.br";

/// Address record returned by the postal lookup
///
/// ViaCEP answers unknown codes with `{"erro": true}`, which decodes into a
/// record whose fields are all empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalityRecord {
    /// Postal code as formatted by the upstream (e.g. `25255-260`)
    pub cep: String,

    /// Street
    pub logradouro: String,

    /// District
    pub bairro: String,

    /// City name
    pub localidade: String,

    /// State code
    pub uf: String,
}

impl LocalityRecord {
    /// City name, empty when the postal code is unknown upstream
    pub fn locality(&self) -> &str {
        &self.localidade
    }

    /// Whether the upstream returned a usable city name
    pub fn has_locality(&self) -> bool {
        !self.localidade.trim().is_empty()
    }
}

/// Client for the postal lookup API
#[derive(Debug, Clone)]
pub struct LocalityResolver {
    client: Client,
    base_url: String,
}

impl LocalityResolver {
    /// Create a resolver against the public ViaCEP endpoint
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_POSTAL_BASE_URL)
    }

    /// Create a resolver against a custom base URL (mock servers, mirrors)
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Endpoint for a given postal code
    pub fn endpoint(&self, cep: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep)
    }

    /// Resolve a postal code to its address record
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// - `LookupError::Transport` if the request cannot be sent or the body read
    /// - `LookupError::UpstreamStatus` on a non-success status
    /// - `LookupError::Parse` if the body is not a ViaCEP record
    pub async fn resolve(&self, cep: &PostalCode) -> LookupResult<LocalityRecord> {
        let url = self.endpoint(cep);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::transport(Upstream::Postal, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(cep = %cep, status = status.as_u16(), "Postal lookup returned error status");
            return Err(LookupError::UpstreamStatus {
                service: Upstream::Postal,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::transport(Upstream::Postal, e))?;

        let record: LocalityRecord = serde_json::from_slice(&body)
            .map_err(|e| LookupError::parse(Upstream::Postal, e.to_string()))?;

        tracing::info!(
            cep = %cep,
            locality = %record.localidade,
            uf = %record.uf,
            "Postal lookup resolved"
        );

        Ok(record)
    }
}
