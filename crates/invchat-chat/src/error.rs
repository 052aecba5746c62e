//! Error types for the chat engine.

use invchat_core::error::InvchatError;

use crate::completion::ProviderError;

/// Errors raised while handling a chat message.
///
/// None of these escape `ChatOrchestrator::process`; they are rendered into
/// the answer text of an error `ChatResult`.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("session store error: {0}")]
    SessionStore(String),
}

impl From<ChatError> for InvchatError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Provider(e) => InvchatError::Provider(e.to_string()),
            other => InvchatError::Api(other.to_string()),
        }
    }
}
