//! Prompt assembly for the completion call.

use invchat_core::types::{Role, Turn};

use crate::intent::QueryPattern;

/// Persona and style instructions sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful inventory management assistant. \
You help users query their inventory database which includes assets, customers, vendors, \
sites, locations, bills, purchase orders, and sales orders.

When a user asks a question about their inventory, provide a clear, concise answer.
Focus on being helpful and accurate. Keep responses brief and to the point.";

/// Rewrite a user message to carry the matched intent and its SQL.
///
/// The model is asked to answer as though the query ran, without
/// inventing figures or echoing the SQL back.
pub fn annotate(message: &str, pattern: &QueryPattern) -> String {
    format!(
        "{message}\n\n\
         [System: intent='{intent}'. \
         SQL query to be executed: {sql}. \
         Answer template hint: {template}. \
         Decide whether the template is useful based on the SQL result & User Message. Modify if needed. \
         Respond with a concise, high-level answer as if the query executed. \
         Do not invent specific numbers unless the user provided them. \
         If results are unknown, describe what the result set would contain (entities, counts). \
         Do not show SQL. Keep under 60 words.]",
        message = message,
        intent = pattern.intent,
        sql = pattern.sql,
        template = pattern.answer_template,
    )
}

/// Build the outgoing message list for one request.
///
/// `history` is the stored conversation before this request. The new user
/// message is appended last and, when an intent matched, sent in annotated
/// form. The annotation exists only in the returned list.
pub fn build_messages(history: &[Turn], message: &str, matched: Option<&QueryPattern>) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Turn::system(SYSTEM_PROMPT));
    messages.extend(history.iter().cloned());

    let content = match matched {
        Some(pattern) => annotate(message, pattern),
        None => message.to_string(),
    };
    messages.push(Turn::new(Role::User, content));
    messages
}
