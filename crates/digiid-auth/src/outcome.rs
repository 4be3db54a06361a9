//! Terminal outcome of an authentication attempt.

use digiid_types::constants::GENERIC_ERROR_MESSAGE;
use serde::Serialize;
use serde_json::Value;

/// Result of executing a signed request against the remote origin.
///
/// Exactly one outcome is produced per [`digiid_types::AuthRequest`]; all
/// variants are terminal and nothing is retried. A new scan is the only way
/// to try again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    /// The server accepted the signed challenge (HTTP status in [200,300)).
    Success,
    /// The server responded outside the success range.
    RemoteError { status: u16, message: String },
    /// No response was received (connect/DNS/TLS failure or timeout), or
    /// the challenge could not be signed.
    TransportError { message: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Status code as display text, empty when there is none (transport
    /// failures carry no status).
    pub fn status_label(&self) -> String {
        match self {
            Self::RemoteError { status, .. } => status.to_string(),
            _ => String::new(),
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// Remote services are not guaranteed to return structured error bodies, so
/// this is an ordered three-tier fallback:
/// 1. a JSON object with a `message` string, or with a single string value,
///    yields that value;
/// 2. otherwise non-empty body text is used verbatim;
/// 3. otherwise a generic constant.
pub fn error_message_from_body(body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
        if map.len() == 1 {
            if let Some(Value::String(message)) = map.values().next() {
                return message.clone();
            }
        }
    }

    match std::str::from_utf8(body) {
        Ok(text) if !text.trim().is_empty() => text.to_string(),
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_message_key() {
        assert_eq!(
            error_message_from_body(br#"{"message":"unauthorized"}"#),
            "unauthorized"
        );
    }

    #[test]
    fn test_json_single_key_without_message_name() {
        assert_eq!(
            error_message_from_body(br#"{"error":"nonce expired"}"#),
            "nonce expired"
        );
    }

    #[test]
    fn test_json_message_key_wins_over_other_keys() {
        assert_eq!(
            error_message_from_body(br#"{"code":7,"message":"bad signature"}"#),
            "bad signature"
        );
    }

    #[test]
    fn test_raw_text_body_used_verbatim() {
        assert_eq!(error_message_from_body(b"server exploded"), "server exploded");
    }

    #[test]
    fn test_unstructured_json_falls_through_to_text() {
        // Parses as JSON but carries no usable message, so tier 2 applies.
        assert_eq!(error_message_from_body(br#"[1,2,3]"#), "[1,2,3]");
    }

    #[test]
    fn test_empty_body_falls_back_to_generic() {
        assert_eq!(error_message_from_body(b""), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message_from_body(b"   \n"), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_utf8_body_falls_back_to_generic() {
        assert_eq!(error_message_from_body(&[0xff, 0xfe, 0x00]), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_label() {
        let remote = AuthOutcome::RemoteError {
            status: 404,
            message: "unauthorized".to_string(),
        };
        assert_eq!(remote.status_label(), "404");

        let transport = AuthOutcome::TransportError {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        };
        assert_eq!(transport.status_label(), "");
        assert_eq!(AuthOutcome::Success.status_label(), "");
    }
}
