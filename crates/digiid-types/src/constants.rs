//! Protocol constants for DigiID authentication URIs and callbacks.

/// URI scheme of a DigiID authentication request.
pub const DIGIID_SCHEME: &str = "digiid";

/// Query parameter carrying the server-issued challenge nonce.
pub const PARAM_NONCE: &str = "x";

/// Query parameter selecting an unsecured (http) callback. Value `1` means
/// the callback is issued over http instead of https.
pub const PARAM_UNSECURE: &str = "u";

/// Query parameter a server sets to declare itself legacy-compatible
/// without requiring a local exception entry.
pub const PARAM_LEGACY: &str = "legacy";

/// Query parameter carrying the companion application's callback URI,
/// opened on success when the app is recognized.
pub const PARAM_SENDER_APP: &str = "app";

/// Fallback error message shown when the remote service returned neither a
/// structured message nor readable body text.
pub const GENERIC_ERROR_MESSAGE: &str = "authentication request was rejected";
