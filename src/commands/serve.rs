use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};

use cep_temperature::config::Config;
use cep_temperature::web::TemperatureServer;

/// Parameters for the `serve` command
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub deadline_ms: Option<u64>,
}

/// Start the temperature HTTP server
pub async fn serve(mut config: Config, params: ServeParams) -> Result<()> {
    let ServeParams {
        host,
        port,
        deadline_ms,
    } = params;

    if host.is_some() || port.is_some() {
        let ip: IpAddr = match host {
            Some(host) => host
                .parse()
                .with_context(|| format!("Invalid bind host: {host}"))?,
            None => config.server.bind_address.ip(),
        };
        let port = port.unwrap_or_else(|| config.server.bind_address.port());
        config.server.bind_address = SocketAddr::new(ip, port);
    }

    if let Some(deadline_ms) = deadline_ms {
        config.lookup.deadline_ms = deadline_ms;
    }

    let server = TemperatureServer::new(config).context("Failed to create temperature server")?;

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  GET  /            - Welcome page");
    println!("  GET  /health      - Health check");
    println!("  GET  /cep/{{cep}}   - Temperature for a postal code");
    println!("  GET  /{{cep}}       - Same, short form");
    println!();
    println!("Press Ctrl+C to stop.\n");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Temperature server stopped.");
    Ok(())
}
