use thiserror::Error;

/// Top-level error type for the invchat service.
///
/// Subsystem crates define their own error types and convert into
/// `InvchatError` where a failure has to cross a crate boundary (startup,
/// server bind). Chat-path failures never reach this type: they are folded
/// into an error `ChatResult` by the orchestrator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for InvchatError {
    fn from(err: toml::de::Error) -> Self {
        InvchatError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for InvchatError {
    fn from(err: serde_json::Error) -> Self {
        InvchatError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for invchat operations.
pub type Result<T> = std::result::Result<T, InvchatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvchatError::Config("OPENAI_API_KEY environment variable is required".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: OPENAI_API_KEY environment variable is required"
        );

        let err = InvchatError::Provider("timed out".into());
        assert_eq!(err.to_string(), "Provider error: timed out");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: InvchatError = io_err.into();
        assert!(matches!(err, InvchatError::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: InvchatError = toml_err.into();
        assert!(matches!(err, InvchatError::Config(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: InvchatError = json_err.into();
        assert!(matches!(err, InvchatError::Serialization(_)));
    }
}
