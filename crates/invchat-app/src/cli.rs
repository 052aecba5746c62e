//! CLI argument definitions for the inventory chatbot server.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use invchat_core::config::InvchatConfig;

/// Env var naming an optional TOML config file.
pub const ENV_CONFIG: &str = "INVCHAT_CONFIG";

/// Standard tracing filter env var, consulted when --log-level is absent.
pub const ENV_LOG: &str = "RUST_LOG";

/// Inventory chatbot: answers inventory questions and shows the SQL behind them.
#[derive(Parser, Debug, Default)]
#[command(name = "invchat", version, about)]
pub struct CliArgs {
    /// Path to a TOML configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Interface to bind the HTTP server to.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Chat model name sent to the provider.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Log filter (trace, debug, info, warn, error, or a full directive).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > INVCHAT_CONFIG env var. `None` means run
    /// on defaults plus environment.
    pub fn resolve_config_path(&self) -> Option<PathBuf> {
        self.resolve_config_path_with(|k| std::env::var(k).ok())
    }

    fn resolve_config_path_with<F>(&self, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref p) = self.config {
            return Some(p.clone());
        }
        lookup(ENV_CONFIG)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Resolve the log filter directive.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > "info".
    pub fn resolve_log_filter(&self) -> String {
        self.resolve_log_filter_with(|k| std::env::var(k).ok())
    }

    fn resolve_log_filter_with<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        self.log_level
            .clone()
            .or_else(|| lookup(ENV_LOG).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| "info".to_string())
    }

    /// Apply flag overrides on top of an already-resolved configuration.
    pub fn apply_to(&self, config: &mut InvchatConfig) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref model) = self.model {
            config.provider.model = model.clone();
        }
    }
}
