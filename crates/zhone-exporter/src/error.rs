//! Exporter error types with miette diagnostics.
//!
//! Only startup can fail the process. Scrape failures are reported to the
//! Prometheus server as HTTP 500 and never reach this type.

use std::net::SocketAddr;

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const BIND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum ExporterError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("No gateway host given")]
    #[diagnostic(
        code(zhone::no_host),
        help(
            "Pass the gateway address as the first argument, e.g.\n\
             zhone-exporter 192.168.1.1\n\
             or set ZHONE_HOST, or `host` in the config file."
        )
    )]
    NoHost,

    #[error("Invalid listen address '{value}'")]
    #[diagnostic(
        code(zhone::invalid_listen),
        help("Use <ip>:<port>, e.g. 127.0.0.1:2112, or :<port> for all interfaces.")
    )]
    InvalidListen { value: String },

    #[error("Invalid metrics path '{value}'")]
    #[diagnostic(
        code(zhone::invalid_metrics_path),
        help("The metrics path must not be '/', which serves the landing page.")
    )]
    InvalidMetricsPath { value: String },

    #[error("Invalid gateway host '{host}'")]
    #[diagnostic(
        code(zhone::invalid_host),
        help("Use an address (192.168.1.1), address:port, or an http:// URL.")
    )]
    InvalidHost {
        host: String,
        #[source]
        source: zhone_api::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(zhone::no_config),
        help("Check the --config path, or omit it to use the default location.")
    )]
    ConfigNotFound { path: String },

    #[error(transparent)]
    #[diagnostic(code(zhone::config))]
    Config(Box<figment::Error>),

    // ── Server ───────────────────────────────────────────────────────
    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(zhone::bind),
        help("Is another exporter already running on this port?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed")]
    #[diagnostic(code(zhone::serve))]
    Serve(#[source] std::io::Error),
}

impl From<figment::Error> for ExporterError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl ExporterError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoHost
            | Self::InvalidListen { .. }
            | Self::InvalidMetricsPath { .. }
            | Self::InvalidHost { .. } => exit_code::USAGE,
            Self::ConfigNotFound { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::Bind { .. } => exit_code::BIND,
            Self::Serve(_) => exit_code::GENERAL,
        }
    }
}
