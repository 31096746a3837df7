mod cli;
mod config;
mod error;
mod server;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zhone_api::{GatewayClient, TransportConfig};
use zhone_core::Collector;

use crate::cli::Cli;
use crate::error::ExporterError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), ExporterError> {
    let config = config::load(&cli)?;

    let transport = TransportConfig::default().with_timeout(config.timeout);
    let client = GatewayClient::new(&config.host, config.credentials.clone(), &transport)
        .map_err(|source| ExporterError::InvalidHost {
            host: config.host.clone(),
            source,
        })?;
    info!(
        gateway = %client.base_url(),
        timeout_secs = config.timeout.as_secs(),
        "exporter starting"
    );

    server::serve(&config, Collector::new(client)).await
}
