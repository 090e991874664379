//! Conversation pane module.
//!
//! The conversation pane fills the screen above the input bar:
//! - Message bubbles with avatars and time labels
//! - Typing indicator while a reply is outstanding
//! - Scroll state that follows the newest message

mod bubble;
mod scroll;
mod widget;

pub use scroll::{TranscriptScroll, PAGE_LINES};
pub use widget::ConversationPane;
