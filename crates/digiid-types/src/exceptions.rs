//! Legacy-domain exception list.
//!
//! Some older DigiID servers require the legacy-compatible wire encoding.
//! The user maintains a list of such domains; it is loaded once from config
//! and passed read-only into strategy selection, never consulted as global
//! state.

use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::path::Path;

/// A read-only set of domains requiring the legacy signing variant.
///
/// Entries are stored lowercased. A domain matches an entry exactly, or by
/// suffix when it ends with `"." + entry` (`login.old.example.com` matches
/// the entry `old.example.com`). A bare substring never matches:
/// `legacyexample.com` does not match the entry `example.com`.
#[derive(Debug, Clone, Default)]
pub struct ExceptionList {
    domains: BTreeSet<String>,
}

impl ExceptionList {
    /// Build a list from domain strings.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Load a list from a JSON file containing an array of domain strings.
    ///
    /// A missing file yields an empty list, so a fresh install needs no
    /// config step before the first scan.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let domains: Vec<String> = serde_json::from_str(&raw)?;
        Ok(Self::from_domains(domains))
    }

    /// Persist the list back to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let domains: Vec<&String> = self.domains.iter().collect();
        let raw = serde_json::to_string_pretty(&domains)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Whether `domain` matches any entry by exact or suffix match.
    pub fn matches(&self, domain: &str) -> bool {
        let domain = domain.to_ascii_lowercase();
        self.domains.iter().any(|entry| {
            domain == *entry
                || (domain.len() > entry.len()
                    && domain.ends_with(entry)
                    && domain.as_bytes()[domain.len() - entry.len() - 1] == b'.')
        })
    }

    /// Add a domain. Returns false if it was already present.
    pub fn add(&mut self, domain: &str) -> bool {
        self.domains.insert(domain.trim().to_ascii_lowercase())
    }

    /// Remove a domain. Returns false if it was not present.
    pub fn remove(&mut self, domain: &str) -> bool {
        self.domains.remove(&domain.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterate over the entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|d| d.as_str())
    }
}
