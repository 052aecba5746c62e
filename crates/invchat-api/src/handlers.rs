//! Route handler functions for all API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use invchat_chat::QueryPatternInfo;
use invchat_core::types::ChatResult;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /api/chat.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Opaque conversation key chosen by the caller.
    pub session_id: String,
    /// The user's question.
    pub message: String,
    /// Free-form client context. Accepted and ignored.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Response for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current time, ISO-8601 in UTC.
    pub timestamp: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/chat - answer a question and show the SQL that would answer it.
///
/// Downstream failures are reported in the body (`status: "error"`) with a
/// 200 response; only unparseable or oversized requests produce an HTTP error.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, ApiError> {
    let Json(request) = payload?;

    let limit = state.chat.max_message_length;
    let length = request.message.chars().count();
    if length > limit {
        tracing::warn!(length, limit, "Rejecting oversized chat message");
        return Err(ApiError::PayloadTooLarge(format!(
            "message exceeds maximum length of {} characters",
            limit
        )));
    }

    let span = tracing::info_span!(
        "chat",
        request_id = %Uuid::new_v4(),
        session_id = %request.session_id,
    );

    let result = async move {
        if request.context.is_some() {
            tracing::debug!("Ignoring client context");
        }
        state
            .orchestrator
            .process(&request.session_id, &request.message)
            .await
    }
    .instrument(span)
    .await;

    Ok(Json(result))
}

/// GET /api/intents - the ordered intent table.
pub async fn list_intents(State(state): State<AppState>) -> Json<Vec<QueryPatternInfo>> {
    let intents = state
        .orchestrator
        .matcher()
        .patterns()
        .iter()
        .map(QueryPatternInfo::from)
        .collect();
    Json(intents)
}

/// GET /health - liveness check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET / - serve the chat page.
pub async fn root() -> impl IntoResponse {
    Html(invchat_ui::CHAT_HTML)
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
