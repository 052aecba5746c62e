//! Chat orchestrator: central coordinator wiring matcher, sessions and provider.
//!
//! Every call to [`ChatOrchestrator::process`] yields a well-formed
//! [`ChatResult`]; failures are folded into an error envelope rather than
//! returned.

use std::sync::Arc;
use std::time::Instant;

use invchat_core::types::{
    ChatResult, ChatStatus, Turn, TokenUsage, NO_MATCH_SQL,
};

use crate::completion::CompletionClient;
use crate::error::ChatError;
use crate::intent::IntentMatcher;
use crate::prompt;
use crate::session::SessionStore;

/// Stateless coordinator; all conversation state lives in the injected store.
pub struct ChatOrchestrator {
    matcher: Arc<IntentMatcher>,
    sessions: Arc<SessionStore>,
    client: Arc<dyn CompletionClient>,
}

/// Successful outcome of the fallible part of a request.
struct Answer {
    reply: String,
    sql: &'static str,
    usage: TokenUsage,
}

impl ChatOrchestrator {
    pub fn new(
        matcher: Arc<IntentMatcher>,
        sessions: Arc<SessionStore>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            matcher,
            sessions,
            client,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn matcher(&self) -> &Arc<IntentMatcher> {
        &self.matcher
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn provider(&self) -> &str {
        self.client.provider()
    }

    /// Answer one message in the context of a session.
    ///
    /// On success the raw user message and the model's reply are appended
    /// to the session as one contiguous pair. On failure the session is left
    /// exactly as it was and an error result is returned.
    pub async fn process(&self, session_id: &str, message: &str) -> ChatResult {
        let started = Instant::now();
        let outcome = self.try_process(session_id, message).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(answer) => {
                tracing::info!(
                    session_id,
                    latency_ms,
                    total_tokens = answer.usage.total_tokens,
                    status = "ok",
                    "Chat request completed"
                );
                ChatResult {
                    natural_language_answer: answer.reply,
                    sql_query: answer.sql.to_string(),
                    token_usage: answer.usage,
                    latency_ms,
                    provider: self.provider().to_string(),
                    model: self.model().to_string(),
                    status: ChatStatus::Ok,
                }
            }
            Err(e) => {
                tracing::warn!(session_id, latency_ms, error = %e, status = "error", "Chat request failed");
                ChatResult::failure(e, latency_ms, self.provider(), self.model())
            }
        }
    }

    async fn try_process(&self, session_id: &str, message: &str) -> Result<Answer, ChatError> {
        let matched = self.matcher.match_intent(message);
        let sql = matched.map_or(NO_MATCH_SQL, |p| p.sql);
        match matched {
            Some(p) => tracing::debug!(session_id, intent = p.intent, "Intent matched"),
            None => tracing::debug!(session_id, "No intent matched"),
        }

        let history = self.sessions.read_all(session_id)?;
        let messages = prompt::build_messages(&history, message, matched);

        let completion = self.client.complete(&messages).await?;

        self.sessions.extend(
            session_id,
            [Turn::user(message), Turn::assistant(completion.reply.clone())],
        )?;

        Ok(Answer {
            reply: completion.reply,
            sql,
            usage: completion.usage,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
