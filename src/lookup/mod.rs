//! Postal code to temperature lookup
//!
//! - [`postal`] - sanitize and validate the incoming CEP
//! - [`locality`] - resolve the CEP to a city through ViaCEP
//! - [`weather`] - resolve the city's current temperature through WeatherAPI
//! - [`convert`] - derive Fahrenheit and Kelvin from Celsius
//! - [`orchestrator`] - run both stages concurrently under a deadline

pub mod convert;
pub mod error;
pub mod locality;
pub mod orchestrator;
pub mod postal;
pub mod weather;

pub use convert::TemperatureReport;
pub use error::{LookupError, LookupResult, Upstream};
pub use locality::{LocalityRecord, LocalityResolver};
pub use orchestrator::TemperatureLookup;
pub use postal::PostalCode;
pub use weather::{TemperatureRecord, TemperatureResolver};
