//! Signing strategy selection.

use crate::exceptions::ExceptionList;
use serde::Serialize;

/// How the signed challenge is encoded for the callback request.
///
/// Selected per request; carries no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningStrategy {
    /// JSON callback body understood by current DigiID servers.
    Standard,
    /// Form-encoded callback body required by older servers.
    LegacyCompatible,
}

impl SigningStrategy {
    /// Select the strategy for a request's origin domain.
    ///
    /// Pure and deterministic: the same (domain, exception list) pair always
    /// yields the same strategy, and selection cannot fail.
    pub fn select(domain: &str, exceptions: &ExceptionList) -> Self {
        if exceptions.matches(domain) {
            Self::LegacyCompatible
        } else {
            Self::Standard
        }
    }
}

impl std::fmt::Display for SigningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::LegacyCompatible => write!(f, "legacy-compatible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_not_listed_selects_standard() {
        let exceptions = ExceptionList::from_domains(["other.example.net"]);
        assert_eq!(
            SigningStrategy::select("example.com", &exceptions),
            SigningStrategy::Standard
        );
    }

    #[test]
    fn test_listed_domain_selects_legacy() {
        let exceptions = ExceptionList::from_domains(["legacy.example.com"]);
        assert_eq!(
            SigningStrategy::select("legacy.example.com", &exceptions),
            SigningStrategy::LegacyCompatible
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let exceptions = ExceptionList::from_domains(["legacy.example.com"]);
        let first = SigningStrategy::select("legacy.example.com", &exceptions);
        for _ in 0..10 {
            assert_eq!(SigningStrategy::select("legacy.example.com", &exceptions), first);
        }
    }
}
