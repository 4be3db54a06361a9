//! Per-strategy callback wire formats.
//!
//! Both strategies carry the same three fields (address, uri, signature);
//! they differ only in how the body is encoded. Current servers take a JSON
//! object, older ones predate that and take a form-encoded body. The exact
//! octets are owned by the remote service, so both encodings are pinned by
//! tests.

use crate::signer::SignedChallenge;
use digiid_types::{AuthRequest, SigningStrategy};

/// An encoded callback request body.
#[derive(Debug, Clone)]
pub struct CallbackBody {
    pub content_type: &'static str,
    pub payload: Vec<u8>,
}

impl CallbackBody {
    /// Encode the signed challenge for the given strategy.
    pub fn build(
        strategy: SigningStrategy,
        request: &AuthRequest,
        signed: &SignedChallenge,
    ) -> Self {
        match strategy {
            SigningStrategy::Standard => {
                let body = serde_json::json!({
                    "address": signed.address,
                    "uri": request.uri,
                    "signature": signed.signature,
                });
                Self {
                    content_type: "application/json",
                    payload: body.to_string().into_bytes(),
                }
            }
            SigningStrategy::LegacyCompatible => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("address", &signed.address)
                    .append_pair("uri", &request.uri)
                    .append_pair("signature", &signed.signature)
                    .finish();
                Self {
                    content_type: "application/x-www-form-urlencoded",
                    payload: body.into_bytes(),
                }
            }
        }
    }
}
