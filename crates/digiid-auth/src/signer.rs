//! Wallet signing capability seam.
//!
//! Key derivation and storage live in the wallet's key-management component;
//! this crate only needs "given a challenge string, produce a signature and
//! the signing address". That capability is injected as a trait object so
//! the flow never touches key material.

use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

/// A challenge signed by the wallet.
#[derive(Debug, Clone)]
pub struct SignedChallenge {
    /// Address proving ownership.
    pub address: String,
    /// Signature over the challenge, base64-encoded.
    pub signature: String,
}

impl SignedChallenge {
    /// Build from raw signature bytes, base64-encoding them.
    pub fn from_raw(address: &str, signature: &[u8]) -> Self {
        Self {
            address: address.to_string(),
            signature: base64::engine::general_purpose::STANDARD.encode(signature),
        }
    }
}

/// Signing capability exposed by the wallet's key-management component.
pub trait ChallengeSigner {
    /// Sign the challenge string (the full authentication URI).
    fn sign_challenge(&self, challenge: &str) -> Result<SignedChallenge, SignerError>;
}

/// Signer carrying a fixed, externally produced signature.
///
/// Used by tooling that exercises a DigiID server with a known-good
/// (address, signature) pair, and by tests.
#[derive(Debug, Clone)]
pub struct PresignedSigner {
    address: String,
    signature: String,
}

impl PresignedSigner {
    /// Build from an address and a base64 signature string.
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: signature.to_string(),
        }
    }

    /// Build from an address and raw signature bytes.
    pub fn from_raw(address: &str, signature: &[u8]) -> Self {
        let signed = SignedChallenge::from_raw(address, signature);
        Self {
            address: signed.address,
            signature: signed.signature,
        }
    }
}

impl ChallengeSigner for PresignedSigner {
    fn sign_challenge(&self, _challenge: &str) -> Result<SignedChallenge, SignerError> {
        Ok(SignedChallenge {
            address: self.address.clone(),
            signature: self.signature.clone(),
        })
    }
}
