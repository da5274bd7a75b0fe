use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cep_temperature::config::{Config, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "cep-temperature",
    version,
    about = "Current temperature for a Brazilian postal code (CEP)",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "CEP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json), overrides the configuration
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind host, overrides the configuration
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides the configuration
        #[arg(short, long)]
        port: Option<u16>,

        /// Lookup deadline in milliseconds, overrides the configuration
        #[arg(long)]
        deadline_ms: Option<u64>,
    },

    /// Resolve a single postal code and print the temperature report
    Lookup {
        /// Postal code, formatting characters are ignored (e.g. 01001-000)
        cep: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    setup_tracing(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            deadline_ms,
        } => {
            tracing::info!(
                config = ?cli.config,
                host = ?host,
                port = ?port,
                deadline_ms = ?deadline_ms,
                "Starting serve command"
            );
            commands::serve(
                config,
                commands::ServeParams {
                    host,
                    port,
                    deadline_ms,
                },
            )
            .await?;
        }

        Commands::Lookup { cep } => {
            tracing::info!(cep = %cep, config = ?cli.config, "Starting lookup command");
            commands::lookup(config, cep).await?;
        }
    }

    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("cep_temperature=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "cep_temperature={level},tower_http={level},warn",
                level = logging.level
            ))
        })
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "text" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        other => anyhow::bail!("Unknown log format '{other}', expected text or json"),
    }

    Ok(())
}
