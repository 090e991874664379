//! Message types for a chat session.

use chrono::{DateTime, Local};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Text typed by the person at the terminal.
    User,
    /// Reply from the remote service, or a synthetic error notice.
    Bot,
}

/// A single entry in the conversation.
#[derive(Debug, Clone)]
pub struct Message {
    /// Display text. Never empty.
    pub text: String,
    /// Who wrote it.
    pub role: Role,
    /// When the message was constructed. Display only; ordering is insertion order.
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::User,
            timestamp: Local::now(),
        }
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::Bot,
            timestamp: Local::now(),
        }
    }

    /// Whether the message was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Hour:minute label shown under the message.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}
