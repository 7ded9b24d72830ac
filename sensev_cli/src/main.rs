mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sensev_api::{ApiConfig, Client};

/// Environment variable consulted for the token when `--token` is absent.
const TOKEN_ENV: &str = "SENSEV_TOKEN";

#[derive(Parser)]
#[command(name = "sensev")]
#[command(about = "Query a SenseV gateway JSON API")]
struct Cli {
    /// YAML file with an `api` section (token, host, port)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API token (falls back to $SENSEV_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Gateway host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Gateway port
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET an endpoint and print the JSON response
    Get(commands::get::GetArgs),
    /// POST a JSON body to an endpoint and print the JSON response
    Post(commands::post::PostArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sensev=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = resolve_config(&cli, std::env::var(TOKEN_ENV).ok())?;
    let client = Client::from_config(config);
    tracing::debug!("Using gateway at {}", client.base_url());

    match &cli.command {
        Commands::Get(args) => commands::get::run(args, &client)?,
        Commands::Post(args) => commands::post::run(args, &client)?,
    }

    Ok(())
}

/// Merge the config file (if any) with command-line and environment overrides.
///
/// Precedence: `--token` > `$SENSEV_TOKEN` > file; `--host`/`--port` > file > defaults.
fn resolve_config(cli: &Cli, env_token: Option<String>) -> Result<ApiConfig> {
    let mut config = match &cli.config {
        Some(path) => ApiConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ApiConfig::default(),
    };

    if let Some(token) = cli.token.clone().or(env_token) {
        config.token = token;
    }
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    config.validate().context("Invalid gateway settings")?;
    Ok(config)
}
