use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Sentinels
// =============================================================================

/// SQL text returned when no intent pattern matches the message.
pub const NO_MATCH_SQL: &str = "-- No matching SQL query pattern found for this question";

/// SQL text returned when a chat request fails.
pub const ERROR_SQL: &str = "-- Error occurred";

/// Provider tag reported in every chat result.
pub const PROVIDER_OPENAI: &str = "openai";

// =============================================================================
// Conversation turns
// =============================================================================

/// Speaker of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message exchanged in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// =============================================================================
// Chat result envelope
// =============================================================================

/// Token counters as reported by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Outcome of a chat request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Ok,
    Error,
}

/// Response envelope for one chat request. Built fresh per call, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub natural_language_answer: String,
    pub sql_query: String,
    pub token_usage: TokenUsage,
    pub latency_ms: u64,
    pub provider: String,
    pub model: String,
    pub status: ChatStatus,
}

impl ChatResult {
    /// Degraded result for a failed request: error sentinel SQL, zero usage.
    pub fn failure(
        cause: impl fmt::Display,
        latency_ms: u64,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            natural_language_answer: format!("Error processing request: {}", cause),
            sql_query: ERROR_SQL.to_string(),
            token_usage: TokenUsage::default(),
            latency_ms,
            provider: provider.into(),
            model: model.into(),
            status: ChatStatus::Error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ChatStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(role, Role::System);
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_turn_wire_shape() {
        let json = serde_json::to_value(Turn::user("List all vendors")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "List all vendors");
    }

    #[test]
    fn test_failure_result_invariants() {
        let result = ChatResult::failure("OpenAI API error: timeout", 12, PROVIDER_OPENAI, "gpt-4o-mini");
        assert_eq!(result.status, ChatStatus::Error);
        assert!(!result.is_ok());
        assert_eq!(result.sql_query, ERROR_SQL);
        assert_eq!(result.token_usage, TokenUsage::default());
        assert_eq!(
            result.natural_language_answer,
            "Error processing request: OpenAI API error: timeout"
        );
        assert_eq!(result.latency_ms, 12);
    }

    #[test]
    fn test_chat_result_wire_shape() {
        let result = ChatResult {
            natural_language_answer: "You have a number of active assets.".into(),
            sql_query: NO_MATCH_SQL.into(),
            token_usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
            latency_ms: 240,
            provider: PROVIDER_OPENAI.into(),
            model: "gpt-4o-mini".into(),
            status: ChatStatus::Ok,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["token_usage"]["total_tokens"], 15);
        assert_eq!(json["latency_ms"], 240);
        assert_eq!(json["provider"], "openai");
        assert_eq!(json["sql_query"], NO_MATCH_SQL);
    }
}
