//! Intent detection for inventory questions.
//!
//! Maps a free-text message to one of the canned inventory queries using
//! an ordered regex table where the first matching entry wins.

pub mod patterns;

pub use patterns::{IntentMatcher, QueryPattern, QueryPatternInfo};
