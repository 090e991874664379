//! gabble-engine: Headless core of the gabble chat client
//!
//! This crate provides everything below the terminal UI:
//! - Message model and the append-only conversation store
//! - Chat session with a single in-flight request guard
//! - Backend trait and classified dispatch errors
//! - Gemini `generateContent` HTTP client
//! - Configuration loading and environment overrides

pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod gemini;
pub mod message;
pub mod session;

// Re-export commonly used types
pub use config::{Config, ConfigError, IconChoice, ThemeChoice};
pub use conversation::Conversation;
pub use dispatch::{ChatBackend, DispatchError, APOLOGY};
pub use gemini::{parse_reply, GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use message::{Message, Role};
pub use session::{ChatSession, DispatchState, PendingTurn, SubmitError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
