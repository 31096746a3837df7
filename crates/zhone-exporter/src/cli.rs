//! Clap derive structure for the `zhone-exporter` binary.
//!
//! Every option is optional here: unset options fall through to the config
//! file and built-in defaults in `config.rs`.

use std::path::PathBuf;

use clap::Parser;

/// zhone-exporter -- Prometheus metrics from a Zhone ZNID GPON gateway
#[derive(Debug, Default, Parser)]
#[command(
    name = "zhone-exporter",
    version,
    about = "Prometheus exporter for Zhone ZNID GPON gateways",
    long_about = "Scrapes the gateway's web management pages on every request to the\n\
        metrics endpoint and republishes interface, GPON and wireless client\n\
        statistics in the Prometheus text format."
)]
pub struct Cli {
    /// Gateway address or URL, e.g. 192.168.1.1
    #[arg(env = "ZHONE_HOST")]
    pub host: Option<String>,

    /// Web UI username [default: user]
    #[arg(long, short = 'u', env = "ZHONE_USERNAME")]
    pub username: Option<String>,

    /// Web UI password [default: user]
    #[arg(long, short = 'p', env = "ZHONE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Address to serve metrics on; ":2112" listens on all interfaces [default: 0.0.0.0:2112]
    #[arg(long, short = 'l', env = "ZHONE_LISTEN")]
    pub listen: Option<String>,

    /// HTTP path of the metrics endpoint [default: /metrics]
    #[arg(long, env = "ZHONE_METRICS_PATH")]
    pub metrics_path: Option<String>,

    /// Per-page fetch timeout in seconds [default: 10]
    #[arg(long, env = "ZHONE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "ZHONE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
