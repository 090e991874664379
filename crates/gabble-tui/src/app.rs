//! Application state for the gabble TUI.

use gabble_engine::{ChatSession, Config, DispatchError, PendingTurn, SubmitError};
use tracing::debug;

use crate::conversation::TranscriptScroll;
use crate::event::Action;
use crate::screens::chat::Control;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::ui::widgets::TextInputState;

/// Ticks a notification stays visible (3 seconds at 4 Hz).
const NOTIFICATION_TICKS: u8 = 12;

/// Shown when Enter is pressed while a reply is outstanding.
pub const STILL_WAITING: &str = "Still waiting for a reply...";

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Conversation and in-flight guard.
    pub session: ChatSession,
    /// Pending input.
    pub input_state: TextInputState,
    /// Transcript scroll position.
    pub scroll: TranscriptScroll,
    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,
    /// Model name shown in the status bar.
    pub model_name: String,
    /// Animation counter, advanced on every tick.
    pub tick: usize,
    notification: Option<String>,
    notification_ttl: u8,
}

impl App {
    /// Create a new app from configuration.
    pub fn new(config: &Config, model_name: &str) -> Self {
        let mode = IconMode::from(config.icons);

        Self {
            should_quit: false,
            show_help: false,
            session: ChatSession::new(),
            input_state: TextInputState::new(),
            scroll: TranscriptScroll::new(),
            theme: Theme::from(config.theme),
            icons: IconSet::new(mode),
            borders: BorderSet::new(mode),
            model_name: model_name.to_string(),
            tick: 0,
            notification: None,
            notification_ttl: 0,
        }
    }

    /// Create an app for tests with ASCII icons and a fixed model name.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let config = Config {
            icons: gabble_engine::IconChoice::Ascii,
            ..Config::default()
        };
        Self::new(&config, "gemini-test")
    }

    /// Handle a screen-level action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = !self.show_help,
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if !self.input_state.is_empty() {
                    self.input_state.clear();
                } else {
                    self.should_quit = true;
                }
            }
            Action::ScrollUp(lines) => self.scroll.scroll_up(lines),
            Action::ScrollDown(lines) => self.scroll.scroll_down(lines),
            Action::ScrollTop => self.scroll.to_top(),
            Action::ScrollBottom => self.scroll.to_latest(),
            Action::NewConversation => self.reset_conversation(),
            Action::None => {}
        }
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.input_state.is_blank() && !self.session.is_busy()
    }

    /// Submit the pending input.
    ///
    /// Blank input is ignored and kept. While a reply is outstanding the
    /// input is kept and a notification is shown. Otherwise the user
    /// message is appended, the input cleared, and the turn returned for
    /// dispatch.
    pub fn submit_input(&mut self) -> Option<PendingTurn> {
        match self.session.begin(self.input_state.content()) {
            Ok(turn) => {
                self.input_state.submit();
                self.scroll.to_latest();
                Some(turn)
            }
            Err(SubmitError::Busy) => {
                self.notify(STILL_WAITING);
                None
            }
            Err(SubmitError::Empty) => None,
        }
    }

    /// Apply the outcome of a dispatched turn.
    pub fn finish_turn(&mut self, turn: &PendingTurn, outcome: Result<String, DispatchError>) {
        if self.session.finish(turn, outcome).is_some() {
            self.scroll.to_latest();
        }
    }

    /// Start over with an empty conversation.
    pub fn reset_conversation(&mut self) {
        self.session.reset();
        self.scroll.to_latest();
        self.notify("Started a new conversation");
    }

    /// Handle a click on an input bar control.
    pub fn handle_control(&mut self, control: Control) -> Option<PendingTurn> {
        match control {
            Control::Send if self.can_send() => self.submit_input(),
            Control::Send => None,
            Control::Voice | Control::Download => {
                debug!(?control, "control has no action");
                None
            }
        }
    }

    /// Show a transient message in the status bar.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Current notification, if any.
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Advance animations and expire notifications.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}
