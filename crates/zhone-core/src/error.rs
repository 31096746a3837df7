// ── Core error types ──
//
// `ParseError` is what the page parsers report about a document.
// `CoreError` is what a collection cycle reports to its caller: either the
// fetch failed (translated from `zhone_api::Error`) or a page did not parse.
// Any of them aborts the whole cycle.

use thiserror::Error;

/// A document did not have the shape the parsers expect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An embedded payload or anchor element is absent.
    #[error("pattern `{marker}` not found")]
    PatternNotFound { marker: String },

    /// A list length or record arity did not match.
    #[error("{context}: expected {expected} items, found {found}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A value did not parse as a number.
    #[error("field `{field}` is not numeric: {value:?}")]
    MalformedField { field: String, value: String },

    /// A value did not parse as a hardware address.
    #[error("field `{field}` is not a MAC address: {value:?}")]
    InvalidAddress { field: String, value: String },

    /// An interface label cell is not of the form `Name (id)`.
    #[error("interface label {label:?} is not of the form \"<name> (<id>)\"")]
    LabelFormatError { label: String },
}

impl ParseError {
    pub(crate) fn not_found(marker: impl Into<String>) -> Self {
        Self::PatternNotFound {
            marker: marker.into(),
        }
    }

    pub(crate) fn shape(context: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

/// Unified error type for a collection cycle.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot reach gateway: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Gateway rejected credentials for {url}")]
    AuthenticationFailed { url: String },

    #[error("Gateway request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Gateway returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Gateway client error: {message}")]
    Client { message: String },

    // ── Parse errors ─────────────────────────────────────────────────
    #[error("Failed to parse {page}: {source}")]
    Parse { page: String, source: ParseError },

    // ── Exposition errors ────────────────────────────────────────────
    #[error("Metric exposition failed: {0}")]
    Exposition(String),
}

impl CoreError {
    pub(crate) fn parse(page: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            page: page.into(),
            source,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<zhone_api::Error> for CoreError {
    fn from(err: zhone_api::Error) -> Self {
        match err {
            zhone_api::Error::Authentication { url } => CoreError::AuthenticationFailed { url },
            zhone_api::Error::Timeout { url, timeout_secs } => {
                CoreError::Timeout { url, timeout_secs }
            }
            zhone_api::Error::Status { status, url } => CoreError::HttpStatus { status, url },
            zhone_api::Error::Transport(_) if err.is_unreachable() => {
                CoreError::ConnectionFailed {
                    reason: err.to_string(),
                }
            }
            zhone_api::Error::Transport(e) => CoreError::Client {
                message: e.to_string(),
            },
            zhone_api::Error::InvalidUrl(e) => CoreError::Client {
                message: format!("Invalid URL: {e}"),
            },
            zhone_api::Error::ClientBuild(message) => CoreError::Client { message },
        }
    }
}

impl From<prometheus::Error> for CoreError {
    fn from(err: prometheus::Error) -> Self {
        CoreError::Exposition(err.to_string())
    }
}
