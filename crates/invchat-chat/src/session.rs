//! In-memory conversation history keyed by caller-supplied session id.
//!
//! Sessions are created lazily on first append, grow without bound and
//! live until the process exits or `clear` is called. Nothing is persisted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use invchat_core::types::{Role, Turn};

use crate::error::ChatError;

/// Thread-safe append-only turn log per session.
///
/// Each call takes the lock for a single map operation. Calls for the same
/// session from concurrent requests are not serialized with respect to each
/// other, so their turns may interleave.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Vec<Turn>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn, creating the session if absent.
    pub fn append(
        &self,
        session_id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> Result<(), ChatError> {
        self.extend(session_id, [Turn::new(role, content)])
    }

    /// Append several turns under one lock so they stay contiguous.
    pub fn extend<I>(&self, session_id: &str, turns: I) -> Result<(), ChatError>
    where
        I: IntoIterator<Item = Turn>,
    {
        let mut sessions = self.lock()?;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(turns);
        Ok(())
    }

    /// Full ordered history for a session; empty if the session is unknown.
    pub fn read_all(&self, session_id: &str) -> Result<Vec<Turn>, ChatError> {
        let sessions = self.lock()?;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    /// Remove a session entirely. No-op if it does not exist.
    pub fn clear(&self, session_id: &str) -> Result<(), ChatError> {
        let mut sessions = self.lock()?;
        if sessions.remove(session_id).is_some() {
            tracing::debug!(session_id, "Session cleared");
        }
        Ok(())
    }

    /// Number of sessions currently held.
    pub fn session_count(&self) -> Result<usize, ChatError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Turn>>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::SessionStore(format!("session lock poisoned: {}", e)))
    }
}
