use thiserror::Error;

/// Top-level error type for the `zhone-api` crate.
///
/// Covers every way a page fetch can fail before its body reaches a parser.
/// `zhone-core` maps these into collection-cycle errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The gateway rejected the basic-auth credentials (HTTP 401).
    #[error("Authentication failed for {url}")]
    Authentication { url: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Response ────────────────────────────────────────────────────
    /// Non-2xx status other than 401.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

impl Error {
    /// Returns `true` if the request never got an answer from the gateway.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
