//! Integration tests for the inventory chatbot API.
//!
//! Every endpoint is driven through the full router with `oneshot`, backed
//! by a scripted completion client so no network access is needed. Each
//! test builds its own state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use invchat_api::create_router;
use invchat_api::handlers::HealthResponse;
use invchat_api::state::AppState;
use invchat_chat::{
    ChatOrchestrator, Completion, CompletionClient, IntentMatcher, ProviderError, SessionStore,
};
use invchat_core::config::ChatConfig;
use invchat_core::types::{Turn, TokenUsage, ERROR_SQL, NO_MATCH_SQL};

// =============================================================================
// Helpers
// =============================================================================

/// Completion client that answers from a counter, or always fails.
struct MockClient {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, _messages: &[Turn]) -> Result<Completion, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(ProviderError::Status {
                status: 401,
                body: "invalid api key".to_string(),
            });
        }
        Ok(Completion {
            reply: format!("mock reply {}", n),
            usage: TokenUsage {
                prompt_tokens: 50,
                completion_tokens: 10,
                total_tokens: 60,
            },
        })
    }

    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        "gpt-4o-mini"
    }
}

fn make_state(fail: bool) -> AppState {
    let client = Arc::new(MockClient {
        calls: AtomicUsize::new(0),
        fail,
    });
    let orchestrator = ChatOrchestrator::new(
        Arc::new(IntentMatcher::new()),
        Arc::new(SessionStore::new()),
        client,
    );
    AppState::new(orchestrator, ChatConfig::default())
}

fn make_app() -> axum::Router {
    create_router(make_state(false))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn chat_body(session_id: &str, message: &str) -> String {
    json!({ "session_id": session_id, "message": message }).to_string()
}

/// Read full response body bytes.
async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(resp: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

// =============================================================================
// GET / and /health
// =============================================================================

#[tokio::test]
async fn test_root_serves_chat_page() {
    let resp = make_app().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(html.contains("<title>Inventory Chatbot</title>"));
}

#[tokio::test]
async fn test_health() {
    let resp = make_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body_bytes(resp).await;
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

// =============================================================================
// POST /api/chat
// =============================================================================

#[tokio::test]
async fn test_chat_matched_intent() {
    let resp = make_app()
        .oneshot(post_json(
            "/api/chat",
            &chat_body("s1", "How many assets do I have?"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["natural_language_answer"], "mock reply 1");
    assert_eq!(
        json["sql_query"],
        "SELECT COUNT(*) AS AssetCount FROM Assets WHERE Status <> 'Disposed';"
    );
    assert_eq!(json["provider"], "openai");
    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["token_usage"]["prompt_tokens"], 50);
    assert_eq!(json["token_usage"]["completion_tokens"], 10);
    assert_eq!(json["token_usage"]["total_tokens"], 60);
    assert!(json["latency_ms"].is_u64());
}

#[tokio::test]
async fn test_chat_unmatched_returns_sentinel_sql() {
    let resp = make_app()
        .oneshot(post_json("/api/chat", &chat_body("s1", "what's the weather?")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sql_query"], NO_MATCH_SQL);
}

#[tokio::test]
async fn test_chat_accepts_and_ignores_context() {
    let body = json!({
        "session_id": "s1",
        "message": "List all vendors",
        "context": { "page": "dashboard", "filters": [1, 2] }
    });
    let resp = make_app()
        .oneshot(post_json("/api/chat", &body.to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    let sql = json["sql_query"].as_str().unwrap();
    assert!(sql.starts_with("SELECT VendorCode, VendorName"));
    assert!(sql.ends_with("ORDER BY VendorName;"));
}

#[tokio::test]
async fn test_chat_provider_failure_is_error_envelope() {
    let app = create_router(make_state(true));
    let resp = app
        .oneshot(post_json("/api/chat", &chat_body("s1", "List all vendors")))
        .await
        .unwrap();
    // Downstream failures still answer 200.
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["sql_query"], ERROR_SQL);
    assert_eq!(json["token_usage"]["total_tokens"], 0);
    let answer = json["natural_language_answer"].as_str().unwrap();
    assert!(answer.starts_with("Error processing request: "));
    assert!(answer.contains("401"));
}

#[tokio::test]
async fn test_chat_blank_message_takes_no_match_path() {
    for message in ["", "   "] {
        let resp = make_app()
            .oneshot(post_json("/api/chat", &chat_body("s1", message)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sql_query"], NO_MATCH_SQL);
    }
}

#[tokio::test]
async fn test_chat_oversized_message_is_413() {
    let state = make_state(false);
    let app = create_router(state.clone());

    let resp = app
        .oneshot(post_json("/api/chat", &chat_body("big", &"z".repeat(2001))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "payload_too_large");
    assert!(state.orchestrator.sessions().read_all("big").unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_message_at_limit_is_accepted() {
    // Counted in characters, not bytes.
    let resp = make_app()
        .oneshot(post_json("/api/chat", &chat_body("s1", &"\u{00e9}".repeat(2000))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn test_chat_history_grows_per_session() {
    let state = make_state(false);
    let app = create_router(state.clone());

    for (i, msg) in ["How many assets do I have?", "Show me assets by site"]
        .iter()
        .enumerate()
    {
        let resp = app
            .clone()
            .oneshot(post_json("/api/chat", &chat_body("abc", msg)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["natural_language_answer"], format!("mock reply {}", i + 1));
    }

    let sessions = state.orchestrator.sessions();
    let history = sessions.read_all("abc").unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].content, "How many assets do I have?");
    assert_eq!(history[1].content, "mock reply 1");
    assert_eq!(history[2].content, "Show me assets by site");
    assert!(sessions.read_all("other").unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_failure_leaves_history_untouched() {
    let state = make_state(true);
    let app = create_router(state.clone());

    let resp = app
        .oneshot(post_json("/api/chat", &chat_body("abc", "List all sites")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(state.orchestrator.sessions().read_all("abc").unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_malformed_json_is_400() {
    let resp = make_app()
        .oneshot(post_json("/api/chat", "{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_chat_missing_field_is_422() {
    let resp = make_app()
        .oneshot(post_json("/api/chat", r#"{"session_id":"s1"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "unprocessable_entity");
}

#[tokio::test]
async fn test_chat_missing_content_type_is_415() {
    let req = Request::post("/api/chat")
        .body(Body::from(chat_body("s1", "List all vendors")))
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_chat_get_not_allowed() {
    let resp = make_app().oneshot(get("/api/chat")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// GET /api/intents
// =============================================================================

#[tokio::test]
async fn test_intents_lists_table_in_order() {
    let resp = make_app().oneshot(get("/api/intents")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let intents: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["intent"].as_str().unwrap())
        .collect();
    assert_eq!(
        intents,
        vec![
            "asset_count_total",
            "asset_count_by_site",
            "asset_value_by_site",
            "assets_purchased_this_year",
            "top_vendor_by_assets",
            "total_billed_last_quarter",
            "open_purchase_orders",
            "assets_by_category",
            "sales_orders_by_customer_last_month",
            "list_vendors",
            "list_customers",
            "list_sites",
        ]
    );
    assert!(json[0]["patterns"].as_array().unwrap().len() >= 1);
    assert!(json[0]["sql"].as_str().unwrap().starts_with("SELECT"));
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = make_app().oneshot(get("/api/unknown")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "not_found");
}
