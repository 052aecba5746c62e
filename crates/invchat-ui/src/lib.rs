//! invchat UI crate - the embedded browser chat page.
//!
//! The page is a single self-contained HTML file with inline CSS and
//! JavaScript, embedded at compile time via `include_str!` so the server
//! binary has no static files to ship.
//!
//! # Usage
//!
//! ```rust,ignore
//! use invchat_ui::chat_page::CHAT_HTML;
//!
//! async fn root() -> axum::response::Html<&'static str> {
//!     axum::response::Html(CHAT_HTML)
//! }
//! ```

pub mod chat_page;

pub use chat_page::CHAT_HTML;
