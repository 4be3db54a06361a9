//! CLI command implementations.

use digiid_auth::{AuthFlow, AuthOutcome, ExecutorConfig, PresignedSigner, RequestExecutor};
use digiid_types::{AuthRequest, ExceptionList, SigningStrategy};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

/// Parse a scanned URI and print the derived request as JSON.
pub fn parse(uri: &str) -> Result {
    let request = AuthRequest::parse(uri)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

/// Show the strategy the exception list selects for a domain.
pub fn strategy(domain: &str, exceptions_path: &Path) -> Result {
    let exceptions = ExceptionList::load(exceptions_path)?;
    let strategy = SigningStrategy::select(domain, &exceptions);
    println!("{}", strategy);
    Ok(())
}

/// Execute the HTTP callback with a presigned (address, signature) pair.
///
/// Exit code reflects the outcome, so a server deployment can be smoke
/// tested from a shell script.
pub async fn callback(
    uri: &str,
    address: &str,
    signature: &str,
    timeout_secs: u64,
    exceptions_path: &Path,
) -> Result {
    let exceptions = ExceptionList::load(exceptions_path)?;
    let signer = Arc::new(PresignedSigner::new(address, signature));
    let flow = AuthFlow::new(exceptions, signer).with_executor(RequestExecutor::with_config(
        ExecutorConfig {
            timeout: Duration::from_secs(timeout_secs),
        },
    ));

    let attempt = flow.begin(uri)?;
    println!(
        "POST {} ({} strategy)",
        attempt.request().callback_url,
        attempt.strategy()
    );

    match attempt.outcome().await {
        AuthOutcome::Success => {
            println!("Success");
            Ok(())
        }
        AuthOutcome::RemoteError { status, message } => {
            Err(format!("rejected ({}): {}", status, message).into())
        }
        AuthOutcome::TransportError { message } => {
            Err(format!("transport failure: {}", message).into())
        }
    }
}

/// Print all exception entries, one per line.
pub fn exceptions_list(path: &Path) -> Result {
    let exceptions = ExceptionList::load(path)?;
    if exceptions.is_empty() {
        println!("(no legacy domains configured)");
        return Ok(());
    }
    for domain in exceptions.iter() {
        println!("{}", domain);
    }
    Ok(())
}

/// Add a domain to the exception list file.
pub fn exceptions_add(domain: &str, path: &Path) -> Result {
    let mut exceptions = ExceptionList::load(path)?;
    if exceptions.add(domain) {
        exceptions.save(path)?;
        println!("Added {} ({} total)", domain, exceptions.len());
    } else {
        println!("{} is already listed", domain);
    }
    Ok(())
}

/// Remove a domain from the exception list file.
pub fn exceptions_remove(domain: &str, path: &Path) -> Result {
    let mut exceptions = ExceptionList::load(path)?;
    if exceptions.remove(domain) {
        exceptions.save(path)?;
        println!("Removed {} ({} remaining)", domain, exceptions.len());
    } else {
        println!("{} was not listed", domain);
    }
    Ok(())
}
