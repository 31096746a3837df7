// Gateway HTTP client
//
// Wraps `reqwest::Client` with host-relative URL construction, basic auth
// and status mapping. The individual management pages are implemented as
// inherent methods in `pages.rs` to keep this module focused on transport
// mechanics.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP basic-auth credentials for the gateway's web UI.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Raw HTTP client for the gateway's web management pages.
///
/// Every method returns the undecoded document body. The client holds no
/// per-request state, so one instance can serve overlapping scrapes.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    timeout: Duration,
}

impl GatewayClient {
    /// Create a client for `host` from a `TransportConfig`.
    ///
    /// `host` is what the operator typed: a bare address (`192.168.1.1`),
    /// an address with port, or a full `http://` URL.
    pub fn new(
        host: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(
            http,
            base_url_for_host(host)?,
            credentials,
            transport.timeout,
        ))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Credentials,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout,
        }
    }

    /// The gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a page path plus query pairs.
    pub(crate) fn page_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Fetch a page and return its body as text.
    ///
    /// 401 maps to [`Error::Authentication`], any other non-2xx status to
    /// [`Error::Status`]. Nothing is retried.
    pub async fn get_page(&self, path: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        let url = self.page_url(path, query)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| self.map_transport(e, &url))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e, &url))?;
        trace!(url = %url, bytes = body.len(), "page fetched");
        Ok(body)
    }

    fn map_transport(&self, err: reqwest::Error, url: &Url) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Turn a host argument into the base URL all pages are resolved against.
pub fn base_url_for_host(host: &str) -> Result<Url, Error> {
    let host = host.trim();
    let raw = if host.contains("://") {
        host.to_owned()
    } else {
        format!("http://{host}")
    };
    let mut url = Url::parse(&raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
