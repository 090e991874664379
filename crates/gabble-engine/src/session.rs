//! Chat session: the conversation store plus the single-request dispatch state.
//!
//! A turn is split in two so that the caller never holds the session across
//! the network await:
//!
//! 1. [`ChatSession::begin`] trims the input, appends the user message and
//!    enters [`DispatchState::Sending`].
//! 2. [`ChatSession::finish`] appends the reply (or error notice) and goes
//!    back to [`DispatchState::Idle`].
//!
//! [`ChatSession::submit`] chains both around a [`ChatBackend`] call.

use crate::conversation::Conversation;
use crate::dispatch::{ChatBackend, DispatchError};
use crate::message::Message;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// Waiting on the backend.
    Sending,
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Input was empty after trimming.
    #[error("nothing to send")]
    Empty,

    /// Another request is still outstanding.
    #[error("still waiting for the previous reply")]
    Busy,
}

/// An accepted submission waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Trimmed text to send.
    pub prompt: String,
    epoch: u64,
}

/// Conversation state for one run of the client.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    state: DispatchState,
    /// Bumped by `reset` so replies to earlier turns are dropped.
    epoch: u64,
}

impl ChatSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        self.conversation.all()
    }

    /// Current dispatch state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.state == DispatchState::Sending
    }

    /// Start a turn: validate `raw`, record it, and mark the session busy.
    pub fn begin(&mut self, raw: &str) -> Result<PendingTurn, SubmitError> {
        let prompt = raw.trim();
        if prompt.is_empty() {
            return Err(SubmitError::Empty);
        }
        if self.is_busy() {
            debug!("rejecting submission while a request is outstanding");
            return Err(SubmitError::Busy);
        }

        self.conversation.append(Message::user(prompt));
        self.state = DispatchState::Sending;
        info!(chars = prompt.chars().count(), "turn started");

        Ok(PendingTurn {
            prompt: prompt.to_string(),
            epoch: self.epoch,
        })
    }

    /// Complete a turn with the backend outcome.
    ///
    /// Returns the appended message, or `None` when the turn belongs to a
    /// conversation that has since been reset.
    pub fn finish(
        &mut self,
        turn: &PendingTurn,
        outcome: Result<String, DispatchError>,
    ) -> Option<&Message> {
        if turn.epoch != self.epoch {
            debug!("dropping reply for a turn from before the last reset");
            return None;
        }
        Some(self.complete(outcome))
    }

    fn complete(&mut self, outcome: Result<String, DispatchError>) -> &Message {
        let message = match outcome {
            Ok(text) => {
                debug!(chars = text.chars().count(), "turn completed");
                Message::bot(text)
            }
            Err(e) => {
                warn!(error = %e, "turn failed");
                Message::bot(e.user_message())
            }
        };

        self.state = DispatchState::Idle;
        self.conversation.append(message)
    }

    /// Run a whole turn inline against `backend`.
    pub async fn submit(
        &mut self,
        raw: &str,
        backend: &dyn ChatBackend,
    ) -> Result<&Message, SubmitError> {
        let turn = self.begin(raw)?;
        let outcome = backend.generate(&turn.prompt).await;
        Ok(self.complete(outcome))
    }

    /// Forget the conversation and return to idle.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.state = DispatchState::Idle;
        self.epoch += 1;
        info!("session reset");
    }
}
