use anyhow::{Context, Result};

use cep_temperature::config::Config;
use cep_temperature::lookup::TemperatureLookup;

/// Resolve one postal code and print the report as JSON
///
/// Lookup failures print the same status and message the HTTP API would
/// return, then fail the command.
pub async fn lookup(config: Config, cep: String) -> Result<()> {
    let lookup = TemperatureLookup::from_config(&config).context("Failed to build lookup")?;

    match lookup.lookup(&cep).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", e.status_code(), e.public_message());
            Err(e).with_context(|| format!("Lookup failed for {cep}"))
        }
    }
}
