//! HTTP front end for the temperature lookup
//!
//! ```text
//! GET /            welcome page
//! GET /health      liveness and uptime
//! GET /cep/{cep}   temperature for a postal code
//! GET /{cep}       same, short form
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cep_temperature::config::Config;
//! use cep_temperature::web::TemperatureServer;
//!
//! let config = Config::from_env()?;
//! let server = TemperatureServer::new(config)?;
//! server.start().await?;
//! ```

pub mod api;
pub mod server;

pub use api::create_router;
pub use server::{with_middleware, AppState, ServerError, ServerInfo, TemperatureServer};
