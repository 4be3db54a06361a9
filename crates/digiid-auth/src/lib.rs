//! DigiID authentication flow.
//!
//! Takes a scanned `digiid:` URI from parse to terminal outcome: select a
//! signing strategy against the legacy exception list, sign the challenge
//! through an injected wallet signing capability, execute a single HTTP
//! callback, and route the result to one of two user-facing presentations.
//!
//! # Example
//!
//! ```ignore
//! use digiid_auth::{AuthFlow, PresignedSigner};
//! use digiid_types::ExceptionList;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let signer = Arc::new(PresignedSigner::new("DAddr...", "MEQCIA...="));
//!     let flow = AuthFlow::new(ExceptionList::default(), signer);
//!     let attempt = flow.begin("digiid://demo.example.com/cb?x=abc").unwrap();
//!     let outcome = attempt.outcome().await;
//!     println!("{:?}", outcome);
//! }
//! ```

pub mod dispatcher;
pub mod executor;
pub mod flow;
pub mod outcome;
pub mod scanner;
pub mod signer;
pub mod wire;

pub use dispatcher::{dispatch, AppRegistry, UserAction};
pub use executor::{ExecutorConfig, RequestExecutor};
pub use flow::{AuthAttempt, AuthFlow};
pub use outcome::AuthOutcome;
pub use scanner::{FrameResult, ScanSession};
pub use signer::{ChallengeSigner, PresignedSigner, SignedChallenge, SignerError};
