//! DigiID authentication URI parsing.
//!
//! A scanned QR payload such as
//! `digiid://demo.example.com/api/v1/callback?x=9e2f...&u=0` is parsed into
//! an immutable [`AuthRequest`]. The full URI string is itself the challenge
//! the wallet signs; the callback URL is derived from the URI's host and
//! path, over https unless the request explicitly opts into an unsecured
//! callback.

use crate::constants::{
    DIGIID_SCHEME, PARAM_LEGACY, PARAM_NONCE, PARAM_SENDER_APP, PARAM_UNSECURE,
};
use crate::error::ParseError;
use serde::Serialize;
use url::Url;

/// A parsed challenge derived from a scanned authentication URI.
///
/// Created once per scan and immutable afterwards; discarded after the HTTP
/// exchange completes.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    /// The original URI string. This is the challenge that gets signed.
    pub uri: String,
    /// Server-issued challenge nonce (the `x` parameter).
    pub nonce: String,
    /// Callback URL the signed challenge is posted to.
    pub callback_url: String,
    /// Lowercased host component of the callback URL.
    pub domain: String,
    /// The URI declared itself legacy-compatible (`legacy=1`).
    pub declared_legacy: bool,
    /// Companion application callback URI (the `app` parameter), if any.
    pub sender_app: Option<String>,
}

impl AuthRequest {
    /// Parse a scanned payload into an authentication request.
    ///
    /// Fails with [`ParseError`] on empty input, a non-digiid scheme, a
    /// missing host or nonce, or a callback URL that does not survive
    /// re-parsing. No side effects; parse failures never reach the network.
    pub fn parse(payload: &str) -> Result<Self, ParseError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ParseError::Empty);
        }

        let parsed = Url::parse(payload)?;
        if parsed.scheme() != DIGIID_SCHEME {
            return Err(ParseError::Scheme(parsed.scheme().to_string()));
        }

        // The url crate treats digiid as a non-special scheme and leaves
        // opaque hosts in their original case, so lowercase here.
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(ParseError::MissingHost)?
            .to_ascii_lowercase();

        let mut nonce = None;
        let mut unsecure = false;
        let mut declared_legacy = false;
        let mut sender_app = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                PARAM_NONCE => nonce = Some(value.into_owned()),
                PARAM_UNSECURE => unsecure = value == "1",
                PARAM_LEGACY => declared_legacy = value == "1",
                PARAM_SENDER_APP => sender_app = Some(value.into_owned()),
                _ => {}
            }
        }
        let nonce = nonce.ok_or(ParseError::MissingNonce(PARAM_NONCE))?;

        let scheme = if unsecure { "http" } else { "https" };
        let authority = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };
        let callback_url = format!("{}://{}{}", scheme, authority, parsed.path());

        // The callback must itself be a valid URL before anything is signed.
        Url::parse(&callback_url)
            .map_err(|e| ParseError::InvalidCallback(format!("{}: {}", callback_url, e)))?;

        Ok(Self {
            uri: payload.to_string(),
            nonce,
            callback_url,
            domain: host,
            declared_legacy,
            sender_app,
        })
    }

    /// The string the wallet signs (the full original URI).
    pub fn challenge(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let req =
            AuthRequest::parse("digiid://demo.example.com/api/v1/callback?x=abc123").unwrap();
        assert_eq!(req.domain, "demo.example.com");
        assert_eq!(req.nonce, "abc123");
        assert_eq!(req.callback_url, "https://demo.example.com/api/v1/callback");
        assert!(!req.declared_legacy);
        assert!(req.sender_app.is_none());
        assert_eq!(req.challenge(), "digiid://demo.example.com/api/v1/callback?x=abc123");
    }

    #[test]
    fn test_domain_is_lowercased_host() {
        let req = AuthRequest::parse("digiid://Demo.Example.COM/cb?x=1").unwrap();
        assert_eq!(req.domain, "demo.example.com");
        assert_eq!(req.callback_url, "https://demo.example.com/cb");
    }

    #[test]
    fn test_unsecure_flag_selects_http_callback() {
        let req = AuthRequest::parse("digiid://localhost:3000/cb?x=1&u=1").unwrap();
        assert_eq!(req.callback_url, "http://localhost:3000/cb");
    }

    #[test]
    fn test_port_is_preserved() {
        let req = AuthRequest::parse("digiid://example.com:8443/cb?x=1").unwrap();
        assert_eq!(req.callback_url, "https://example.com:8443/cb");
    }

    #[test]
    fn test_query_is_not_part_of_callback() {
        let req = AuthRequest::parse("digiid://example.com/cb?x=1&u=0&extra=2").unwrap();
        assert_eq!(req.callback_url, "https://example.com/cb");
    }

    #[test]
    fn test_declared_legacy_and_sender_app() {
        let req = AuthRequest::parse(
            "digiid://example.com/cb?x=1&legacy=1&app=companion://done",
        )
        .unwrap();
        assert!(req.declared_legacy);
        assert_eq!(req.sender_app.as_deref(), Some("companion://done"));
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(AuthRequest::parse("   "), Err(ParseError::Empty)));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(matches!(
            AuthRequest::parse("https://example.com/cb?x=1"),
            Err(ParseError::Scheme(_))
        ));
    }

    #[test]
    fn test_not_a_uri() {
        assert!(matches!(
            AuthRequest::parse("just some scanned text"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_nonce() {
        assert!(matches!(
            AuthRequest::parse("digiid://example.com/cb?u=0"),
            Err(ParseError::MissingNonce(_))
        ));
    }
}
