//! Backend seam and failure taxonomy for a single chat turn.
//!
//! A turn either yields reply text or one [`DispatchError`]. Failures are
//! never propagated past the session: each one is turned into a bot message
//! through [`DispatchError::user_message`].

use async_trait::async_trait;
use thiserror::Error;

/// Shown for any failure without a more specific notice.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when the service rejects the API key.
pub const AUTH_NOTICE: &str =
    "The service rejected the API key. Check GEMINI_API_KEY or your config file.";

/// Shown when the service reports it is overloaded or rate limited.
pub const BUSY_NOTICE: &str = "The service is busy right now. Please wait a moment and try again.";

/// Why a turn produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request never got an HTTP response (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(u16),

    /// The body did not contain `candidates[0].content.parts[0].text`.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl DispatchError {
    /// Text appended to the conversation in place of a reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Status(401 | 403) => AUTH_NOTICE,
            Self::Status(429) => BUSY_NOTICE,
            Self::Transport(_) | Self::Status(_) | Self::Shape(_) => APOLOGY,
        }
    }
}

/// Something that can turn one prompt into one reply.
///
/// The production implementation is [`crate::GeminiClient`]; tests and the
/// TUI use in-process fakes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short model name, for status display.
    fn model_name(&self) -> &str;

    /// Send `prompt` as the only content of a request and return the reply text.
    async fn generate(&self, prompt: &str) -> Result<String, DispatchError>;
}
