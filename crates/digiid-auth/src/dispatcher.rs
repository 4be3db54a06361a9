//! Outcome dispatch: one completed attempt, one user-facing action.
//!
//! No business logic lives here beyond routing. Presentation code consumes
//! the returned [`UserAction`]; actually showing an alert or opening another
//! application is its problem.

use crate::outcome::AuthOutcome;
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

/// The user-facing action for a completed authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    /// Static success acknowledgment; there is no app to return to.
    ShowSuccess,
    /// Hand control back to the companion app via its callback URI.
    /// Best-effort: the navigation is not verified to succeed.
    OpenSenderApp(String),
    /// Error presentation. `status_label` is the HTTP status as text, or
    /// empty for transport failures.
    ShowError { message: String, status_label: String },
}

/// Recognized companion applications, keyed by URI scheme.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    schemes: BTreeSet<String>,
}

impl AppRegistry {
    /// Build a registry from URI schemes (e.g. `companion`).
    pub fn from_schemes<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            schemes: schemes
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Whether a sender-app URI belongs to a recognized application.
    pub fn recognizes(&self, app_uri: &str) -> bool {
        match Url::parse(app_uri) {
            Ok(url) => self.schemes.contains(url.scheme()),
            Err(_) => false,
        }
    }
}

/// Route a terminal outcome to its user-facing action.
///
/// Success hands off to the sender app only when the app is recognized and
/// a visible context still exists; a dismissed UI degrades to the static
/// acknowledgment (the HTTP exchange is not cancelable, so its outcome can
/// arrive after the presenting view is gone). Pure function.
pub fn dispatch(
    outcome: AuthOutcome,
    sender_app: Option<&str>,
    registry: &AppRegistry,
    has_visible_context: bool,
) -> UserAction {
    match outcome {
        AuthOutcome::Success => match sender_app {
            Some(app) if has_visible_context && registry.recognizes(app) => {
                UserAction::OpenSenderApp(app.to_string())
            }
            _ => UserAction::ShowSuccess,
        },
        AuthOutcome::RemoteError { status, message } => UserAction::ShowError {
            message,
            status_label: status.to_string(),
        },
        AuthOutcome::TransportError { message } => UserAction::ShowError {
            message,
            status_label: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AppRegistry {
        AppRegistry::from_schemes(["companion"])
    }

    #[test]
    fn test_success_without_sender_app_shows_acknowledgment() {
        let action = dispatch(AuthOutcome::Success, None, &registry(), true);
        assert_eq!(action, UserAction::ShowSuccess);
    }

    #[test]
    fn test_success_with_recognized_app_opens_it() {
        let action = dispatch(
            AuthOutcome::Success,
            Some("companion://done?session=5"),
            &registry(),
            true,
        );
        assert_eq!(
            action,
            UserAction::OpenSenderApp("companion://done?session=5".to_string())
        );
    }

    #[test]
    fn test_success_with_unknown_app_shows_acknowledgment() {
        let action = dispatch(AuthOutcome::Success, Some("stranger://x"), &registry(), true);
        assert_eq!(action, UserAction::ShowSuccess);
    }

    #[test]
    fn test_success_without_visible_context_degrades() {
        // UI was dismissed while the exchange was in flight.
        let action = dispatch(
            AuthOutcome::Success,
            Some("companion://done"),
            &registry(),
            false,
        );
        assert_eq!(action, UserAction::ShowSuccess);
    }

    #[test]
    fn test_remote_error_carries_status_label() {
        let action = dispatch(
            AuthOutcome::RemoteError {
                status: 404,
                message: "unauthorized".to_string(),
            },
            None,
            &registry(),
            true,
        );
        assert_eq!(
            action,
            UserAction::ShowError {
                message: "unauthorized".to_string(),
                status_label: "404".to_string(),
            }
        );
    }

    #[test]
    fn test_transport_error_has_empty_status_label() {
        let action = dispatch(
            AuthOutcome::TransportError {
                message: "no route to host".to_string(),
            },
            None,
            &registry(),
            true,
        );
        assert_eq!(
            action,
            UserAction::ShowError {
                message: "no route to host".to_string(),
                status_label: String::new(),
            }
        );
    }

    #[test]
    fn test_malformed_app_uri_is_not_recognized() {
        assert!(!registry().recognizes("not a uri"));
    }
}
