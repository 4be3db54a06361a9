//! Flow coordinator.
//!
//! One authentication attempt is one spawned task with one oneshot result
//! channel. That replaces the nested completion-closure chain the flow grew
//! out of: the caller parses up-front (so malformed payloads never spawn
//! anything), then awaits a single outcome. Dropping the attempt handle does
//! not cancel the exchange; the task runs to completion regardless, and the
//! outcome is simply discarded.

use crate::dispatcher::{self, AppRegistry, UserAction};
use crate::executor::RequestExecutor;
use crate::outcome::AuthOutcome;
use crate::signer::ChallengeSigner;
use digiid_types::constants::GENERIC_ERROR_MESSAGE;
use digiid_types::{AuthRequest, ExceptionList, ParseError, SigningStrategy};
use std::sync::Arc;
use tokio::sync::oneshot;

/// An in-flight authentication attempt.
///
/// Holds the single result channel for its request. Exactly one outcome is
/// delivered per attempt; awaiting it consumes the handle.
pub struct AuthAttempt {
    request: AuthRequest,
    strategy: SigningStrategy,
    outcome: oneshot::Receiver<AuthOutcome>,
}

impl AuthAttempt {
    /// The parsed request this attempt is executing.
    pub fn request(&self) -> &AuthRequest {
        &self.request
    }

    /// The strategy selected for this attempt.
    pub fn strategy(&self) -> SigningStrategy {
        self.strategy
    }

    /// Await the terminal outcome.
    pub async fn outcome(self) -> AuthOutcome {
        // The task always sends; a lost sender means the runtime is tearing
        // down, which reads the same as losing the network.
        self.outcome.await.unwrap_or(AuthOutcome::TransportError {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        })
    }
}

/// Coordinates scanned payloads through parse, strategy selection, signing,
/// and callback execution.
///
/// Concurrent attempts are independent: a second scan before the first
/// exchange completes spawns its own task with its own channel, and neither
/// waits for the other.
pub struct AuthFlow {
    executor: Arc<RequestExecutor>,
    exceptions: ExceptionList,
    app_registry: AppRegistry,
    signer: Arc<dyn ChallengeSigner + Send + Sync>,
}

impl AuthFlow {
    /// Create a flow with a default executor and no recognized sender apps.
    pub fn new(exceptions: ExceptionList, signer: Arc<dyn ChallengeSigner + Send + Sync>) -> Self {
        Self {
            executor: Arc::new(RequestExecutor::new()),
            exceptions,
            app_registry: AppRegistry::default(),
            signer,
        }
    }

    /// Replace the default executor (custom timeout).
    pub fn with_executor(mut self, executor: RequestExecutor) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Set the recognized companion-app registry.
    pub fn with_app_registry(mut self, app_registry: AppRegistry) -> Self {
        self.app_registry = app_registry;
        self
    }

    /// Select the strategy for a parsed request.
    ///
    /// A URI that declares itself legacy (`legacy=1`) short-circuits; the
    /// exception list decides otherwise.
    pub fn strategy_for(&self, request: &AuthRequest) -> SigningStrategy {
        if request.declared_legacy {
            SigningStrategy::LegacyCompatible
        } else {
            SigningStrategy::select(&request.domain, &self.exceptions)
        }
    }

    /// Begin an authentication attempt from a scanned payload.
    ///
    /// Parse failures are returned immediately and reach no further stage.
    /// On success the HTTP exchange runs on its own task and the returned
    /// attempt resolves exactly once.
    pub fn begin(&self, payload: &str) -> Result<AuthAttempt, ParseError> {
        let request = AuthRequest::parse(payload)?;
        let strategy = self.strategy_for(&request);
        log::debug!(
            "starting authentication for {} with {} strategy",
            request.domain,
            strategy
        );

        let (tx, rx) = oneshot::channel();
        let executor = Arc::clone(&self.executor);
        let signer = Arc::clone(&self.signer);
        let task_request = request.clone();
        tokio::spawn(async move {
            let outcome = executor.execute(&task_request, strategy, signer.as_ref()).await;
            // The receiver may be gone (attempt handle dropped); the
            // exchange still ran to completion, per the no-cancel rule.
            let _ = tx.send(outcome);
        });

        Ok(AuthAttempt {
            request,
            strategy,
            outcome: rx,
        })
    }

    /// Route a completed attempt to its user-facing action.
    pub fn dispatch(
        &self,
        outcome: AuthOutcome,
        sender_app: Option<&str>,
        has_visible_context: bool,
    ) -> UserAction {
        dispatcher::dispatch(outcome, sender_app, &self.app_registry, has_visible_context)
    }
}
