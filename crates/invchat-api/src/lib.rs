//! invchat API crate - axum HTTP server and route handlers.
//!
//! Serves the chat endpoint, the intent catalogue, a health check and the
//! embedded chat page.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
