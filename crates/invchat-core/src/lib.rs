pub mod config;
pub mod error;
pub mod schema;
pub mod types;

pub use config::InvchatConfig;
pub use error::{InvchatError, Result};
pub use types::*;
