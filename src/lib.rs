//! cep-temperature - current temperature for a Brazilian postal code
//!
//! Resolves a CEP to its city through ViaCEP, asks WeatherAPI for the city's
//! current temperature and reports it in Celsius, Fahrenheit and Kelvin.
//!
//! # Architecture
//!
//! - [`config`] - Configuration loading and validation
//! - [`lookup`] - Postal code validation, both upstream clients and the
//!   deadline-bounded orchestration
//! - [`web`] - axum router and server
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use cep_temperature::config::Config;
//! use cep_temperature::lookup::TemperatureLookup;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let lookup = TemperatureLookup::from_config(&config)?;
//!     let report = lookup.lookup("01001-000").await?;
//!     println!("{} °C", report.celsius);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod lookup;
pub mod web;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::lookup::{LookupError, PostalCode, TemperatureLookup, TemperatureReport};
    pub use crate::web::TemperatureServer;
}

pub use lookup::{TemperatureLookup, TemperatureReport};
