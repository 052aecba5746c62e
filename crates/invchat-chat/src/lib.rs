//! Conversational front-end over the inventory schema.
//!
//! Matches questions to canned SQL queries, keeps per-session history and
//! asks a chat-completion provider for the natural-language answer.

pub mod completion;
pub mod error;
pub mod intent;
pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use completion::{Completion, CompletionClient, OpenAiClient, ProviderError};
pub use error::ChatError;
pub use intent::{IntentMatcher, QueryPattern, QueryPatternInfo};
pub use orchestrator::ChatOrchestrator;
pub use session::SessionStore;
