//! Chat page HTML.
//!
//! The page posts `{session_id, message, context}` to `/api/chat` and renders
//! the answer, the SQL that would run, token usage and latency. A random
//! session id is generated per browser tab and kept in `sessionStorage`.

/// The complete self-contained chat page served at `/`.
pub const CHAT_HTML: &str = include_str!("chat.html");
