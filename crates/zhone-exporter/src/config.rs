//! Layered exporter configuration.
//!
//! Built-in defaults, then the TOML config file, then `ZHONE_*` environment
//! variables, then command-line flags. The result is validated once into an
//! `ExporterConfig`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use zhone_api::Credentials;

use crate::cli::Cli;
use crate::error::ExporterError;

// ── Settings ────────────────────────────────────────────────────────

/// Raw settings as read from the config file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub host: Option<String>,
    pub username: String,
    pub password: String,
    pub listen: String,
    pub metrics_path: String,
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: None,
            username: "user".into(),
            password: "user".into(),
            listen: "0.0.0.0:2112".into(),
            metrics_path: "/metrics".into(),
            timeout: 10,
        }
    }
}

impl Settings {
    /// Overlay the flags that were given on the command line.
    pub fn apply(mut self, cli: &Cli) -> Self {
        if let Some(ref host) = cli.host {
            self.host = Some(host.clone());
        }
        if let Some(ref username) = cli.username {
            self.username.clone_from(username);
        }
        if let Some(ref password) = cli.password {
            self.password.clone_from(password);
        }
        if let Some(ref listen) = cli.listen {
            self.listen.clone_from(listen);
        }
        if let Some(ref path) = cli.metrics_path {
            self.metrics_path.clone_from(path);
        }
        if let Some(timeout) = cli.timeout {
            self.timeout = timeout;
        }
        self
    }

    /// Validate into the configuration the exporter runs with.
    pub fn resolve(self) -> Result<ExporterConfig, ExporterError> {
        let host = self
            .host
            .filter(|h| !h.trim().is_empty())
            .ok_or(ExporterError::NoHost)?;

        Ok(ExporterConfig {
            host,
            credentials: Credentials::new(self.username, SecretString::from(self.password)),
            listen: parse_listen(&self.listen)?,
            metrics_path: normalize_metrics_path(&self.metrics_path)?,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

/// Fully resolved exporter configuration.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub host: String,
    pub credentials: Credentials,
    pub listen: SocketAddr,
    pub metrics_path: String,
    pub timeout: Duration,
}

// ── Value parsing ───────────────────────────────────────────────────

/// Parse a listen address. A bare `:port` listens on all IPv4 interfaces.
pub fn parse_listen(value: &str) -> Result<SocketAddr, ExporterError> {
    let value = value.trim();
    let full = if value.starts_with(':') {
        format!("0.0.0.0{value}")
    } else {
        value.to_owned()
    };
    full.parse().map_err(|_| ExporterError::InvalidListen {
        value: value.into(),
    })
}

fn normalize_metrics_path(value: &str) -> Result<String, ExporterError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ExporterError::InvalidMetricsPath {
            value: value.into(),
        });
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_owned())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

// ── Config file ─────────────────────────────────────────────────────

/// Default config file location, via XDG / platform conventions.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "zhone-exporter").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Defaults, then `path` (if it exists), then the environment.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed("ZHONE_"))
}

/// Load and resolve the configuration for this invocation.
///
/// An explicit `--config` file must exist; the default one is optional.
pub fn load(cli: &Cli) -> Result<ExporterConfig, ExporterError> {
    let path = match cli.config {
        Some(ref path) if !path.exists() => {
            return Err(ExporterError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Some(ref path) => Some(path.clone()),
        None => config_path(),
    };
    tracing::debug!(path = ?path, "loading configuration");

    let settings: Settings = figment(path.as_deref()).extract()?;
    settings.apply(cli).resolve()
}
