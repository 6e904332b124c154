//! snippedia terminal client entry point.
//!
//! Parses the command line, wires configuration, session store, API
//! client and service together, and surfaces any failure as a single
//! stderr message with a nonzero exit.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snippedia::api::ApiClient;
use snippedia::cli::{self, Cli};
use snippedia::config::ClientConfig;
use snippedia::service::SnippetService;
use snippedia::session::{FileSessionStore, SessionStore};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::debug!(api_url = %config.api_url, "starting snippedia client");

    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::open(config.resolved_token_path())?);
    let api = ApiClient::new(&config, Arc::clone(&session))?;
    let service = SnippetService::new(api);

    cli::run(cli.command, &config, &service, &session).await?;
    Ok(())
}
