//! Option Analytics Server
//!
//! REST API for Black-Scholes-Merton pricing, payoff profiles and implied
//! volatility.

use clap::Parser;
use pricer_server::config::{build_config, CliArgs as ConfigCliArgs, LogFormat};
use pricer_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Option Analytics Server - REST API for European option pricing
#[derive(Parser, Debug)]
#[command(name = "pricer_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRICER_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRICER_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRICER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "PRICER_LOG_FORMAT")]
    log_format: Option<String>,

    /// How volatility and rates are read (auto, fraction, percent)
    #[arg(long, env = "PRICER_RATE_UNITS")]
    rate_units: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            log_format: args.log_format,
            rate_units: args.rate_units,
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let (json_layer, text_layer) = match format {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Text => (None, Some(fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str(), config.log_format);

    tracing::info!("Option Analytics Server v{}", pricer_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        log_format = %config.log_format,
        environment = %config.environment,
        rate_units = %config.rate_units,
        max_payoff_steps = config.max_payoff_steps,
        cors_permissive = config.cors_permissive,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    tracing::info!(address = %server.bind_address(), "Starting server");

    server.run().await?;

    Ok(())
}
