use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// DigiID command-line interface.
#[derive(Parser)]
#[command(name = "digiid")]
#[command(about = "Inspect, test, and execute DigiID authentication requests")]
#[command(version)]
struct Cli {
    /// Legacy-domain exception list file (JSON array of domains).
    #[arg(long)]
    exceptions_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a scanned digiid URI and print the derived request.
    Parse {
        /// The scanned URI.
        uri: String,
    },
    /// Show which signing strategy a domain would select.
    Strategy {
        /// Origin domain to test against the exception list.
        domain: String,
    },
    /// Execute the HTTP callback for a URI with a presigned challenge.
    Callback {
        /// The scanned URI.
        uri: String,
        /// Signing address.
        #[arg(long)]
        address: String,
        /// Base64 signature over the URI.
        #[arg(long)]
        signature: String,
        /// Callback timeout in seconds.
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
    /// Manage the legacy-domain exception list.
    Exceptions {
        #[command(subcommand)]
        action: ExceptionsAction,
    },
}

#[derive(Subcommand)]
enum ExceptionsAction {
    /// List all exception entries.
    List,
    /// Add a domain to the exception list.
    Add { domain: String },
    /// Remove a domain from the exception list.
    Remove { domain: String },
}

/// Default exception list location under the platform config directory.
fn default_exceptions_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("digiid")
        .join("legacy_domains.json")
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let exceptions_path = cli
        .exceptions_file
        .unwrap_or_else(default_exceptions_path);

    let result = match cli.command {
        Commands::Parse { uri } => commands::parse(&uri),
        Commands::Strategy { domain } => commands::strategy(&domain, &exceptions_path),
        Commands::Callback {
            uri,
            address,
            signature,
            timeout,
        } => commands::callback(&uri, &address, &signature, timeout, &exceptions_path).await,
        Commands::Exceptions { action } => match action {
            ExceptionsAction::List => commands::exceptions_list(&exceptions_path),
            ExceptionsAction::Add { domain } => {
                commands::exceptions_add(&domain, &exceptions_path)
            }
            ExceptionsAction::Remove { domain } => {
                commands::exceptions_remove(&domain, &exceptions_path)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
