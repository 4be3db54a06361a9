//! Core types and constants for the DigiID authentication protocol.
//!
//! This crate provides the foundational types used across all digiid crates:
//! authentication URI parsing, the legacy-domain exception list, signing
//! strategy selection, and the protocol error taxonomy.

pub mod constants;
pub mod error;
pub mod exceptions;
pub mod strategy;
pub mod uri;

pub use error::{ConfigError, ParseError};
pub use exceptions::ExceptionList;
pub use strategy::SigningStrategy;
pub use uri::AuthRequest;
