use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{InvchatError, Result};

/// Environment variable holding the provider credential (required).
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable selecting the completion model.
pub const ENV_MODEL_NAME: &str = "MODEL_NAME";
/// Environment variable overriding the provider endpoint.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the provider request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
/// Environment variable for the HTTP listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable for the HTTP listen host.
pub const ENV_HOST: &str = "HOST";

/// Top-level configuration for the invchat service.
///
/// Built from defaults, optionally overlaid by a TOML file, then by
/// environment variables, then by CLI flags (applied by the binary).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvchatConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl InvchatConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: InvchatConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    ///
    /// Unset or empty values leave the current setting untouched. A value
    /// that is present but unparseable is a configuration error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.provider.api_key = key;
        }
        if let Some(model) = get(ENV_MODEL_NAME) {
            self.provider.model = model;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.provider.base_url = url;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.provider.timeout_secs = raw.trim().parse().map_err(|_| {
                InvchatError::Config(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        if let Some(host) = get(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(raw) = get(ENV_PORT) {
            self.server.port = raw.trim().parse().map_err(|_| {
                InvchatError::Config(format!("{} must be a valid port number, got '{}'", ENV_PORT, raw))
            })?;
        }
        Ok(())
    }

    /// Check that the configuration can start the service.
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.trim().is_empty() {
            return Err(InvchatError::Config(format!(
                "{} environment variable is required",
                ENV_API_KEY
            )));
        }
        if self.provider.model.trim().is_empty() {
            return Err(InvchatError::Config("model name cannot be empty".into()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(InvchatError::Config(
                "provider timeout must be at least one second".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(InvchatError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.provider.temperature
            )));
        }
        if self.chat.max_message_length == 0 {
            return Err(InvchatError::Config(
                "max_message_length must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion provider settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bearer credential. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Upper bound on a single completion call.
    pub timeout_secs: u64,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
            temperature: 0.2,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Chat request handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
        }
    }
}
