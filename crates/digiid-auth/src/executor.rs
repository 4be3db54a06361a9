//! Single-shot HTTP callback executor.
//!
//! Signs the challenge through the injected wallet capability and POSTs the
//! encoded body to the request's callback URL. Exactly one [`AuthOutcome`]
//! comes back per call: there is no retry loop and no backoff — a failed
//! attempt is reported as-is and the user scans again.

use crate::outcome::{error_message_from_body, AuthOutcome};
use crate::signer::ChallengeSigner;
use crate::wire::CallbackBody;
use digiid_types::constants::GENERIC_ERROR_MESSAGE;
use digiid_types::{AuthRequest, SigningStrategy};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Configuration for the request executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Callback request timeout.
    pub timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Executes signed authentication callbacks.
pub struct RequestExecutor {
    client: reqwest::Client,
}

impl RequestExecutor {
    /// Create an executor with the default timeout.
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor with full configuration.
    pub fn with_config(config: ExecutorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }

    /// Sign the challenge and issue the callback request.
    ///
    /// Never returns an error: every failure path is folded into the
    /// returned outcome. A signer failure is reported without any HTTP call
    /// being made.
    pub async fn execute<S>(
        &self,
        request: &AuthRequest,
        strategy: SigningStrategy,
        signer: &S,
    ) -> AuthOutcome
    where
        S: ChallengeSigner + ?Sized,
    {
        let signed = match signer.sign_challenge(request.challenge()) {
            Ok(signed) => signed,
            Err(e) => {
                log::warn!("challenge signing failed for {}: {}", request.domain, e);
                return AuthOutcome::TransportError {
                    message: e.to_string(),
                };
            }
        };

        let body = CallbackBody::build(strategy, request, &signed);
        log::debug!(
            "posting {} callback to {} ({} bytes)",
            strategy,
            request.callback_url,
            body.payload.len()
        );

        let response = match self
            .client
            .post(&request.callback_url)
            .header(CONTENT_TYPE, HeaderValue::from_static(body.content_type))
            .body(body.payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("callback to {} failed: {}", request.callback_url, e);
                return AuthOutcome::TransportError {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            log::info!("authentication accepted by {}", request.domain);
            return AuthOutcome::Success;
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message_from_body(&body);
        log::warn!(
            "authentication rejected by {} (status {}): {}",
            request.domain,
            status,
            message
        );
        AuthOutcome::RemoteError { status, message }
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}
