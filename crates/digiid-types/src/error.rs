//! Error types for URI parsing and exception-list configuration.

use thiserror::Error;

/// A scanned payload could not be turned into an [`crate::AuthRequest`].
///
/// Every variant is terminal: no network call is attempted for a payload
/// that fails to parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("scanned payload is empty")]
    Empty,

    #[error("not a digiid URI (scheme {0:?})")]
    Scheme(String),

    #[error("not a URI: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("authentication URI has no host")]
    MissingHost,

    #[error("missing challenge nonce parameter ({0})")]
    MissingNonce(&'static str),

    #[error("callback URL is malformed: {0}")]
    InvalidCallback(String),
}

/// Failure loading or persisting the legacy-domain exception list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("exception list I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exception list is not a JSON array of domains: {0}")]
    Json(#[from] serde_json::Error),
}
