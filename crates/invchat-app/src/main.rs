//! Inventory chatbot binary - composition root.
//!
//! Ties together all invchat crates into a single executable:
//! 1. Parse CLI flags and initialize tracing
//! 2. Resolve configuration (file > environment > flags) and validate it
//! 3. Build the completion client, intent matcher and session store
//! 4. Start the axum HTTP server until Ctrl-C

mod cli;

use std::sync::Arc;

use clap::Parser;

use invchat_api::routes;
use invchat_api::state::AppState;
use invchat_chat::{ChatOrchestrator, IntentMatcher, OpenAiClient, SessionStore};
use invchat_core::config::InvchatConfig;

use cli::CliArgs;

/// Resolve the effective configuration from all sources.
fn resolve_config(args: &CliArgs) -> invchat_core::Result<InvchatConfig> {
    let mut config = match args.resolve_config_path() {
        Some(path) => InvchatConfig::load_or_default(&path),
        None => InvchatConfig::default(),
    };
    config.apply_env()?;
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

/// Resolves once Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. --log-level wins over RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(args.resolve_log_filter()))
        .init();

    tracing::info!("Starting invchat v{}", env!("CARGO_PKG_VERSION"));

    let config = match resolve_config(&args) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    tracing::info!(
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        "Configuration resolved"
    );

    let client = OpenAiClient::new(&config.provider)?;
    let matcher = Arc::new(IntentMatcher::new());
    tracing::info!(intents = matcher.len(), "Intent table compiled");

    let orchestrator = ChatOrchestrator::new(
        matcher,
        Arc::new(SessionStore::new()),
        Arc::new(client),
    );
    let state = AppState::new(orchestrator, config.chat.clone());

    tracing::info!("Chat page at http://{}/", config.server.bind_addr());
    routes::start_server(&config.server, state, shutdown_signal()).await?;

    Ok(())
}
