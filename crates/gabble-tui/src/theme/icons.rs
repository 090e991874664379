//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

use gabble_engine::IconChoice;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl From<IconChoice> for IconMode {
    fn from(choice: IconChoice) -> Self {
        match choice {
            IconChoice::Nerd => Self::Nerd,
            IconChoice::Unicode => Self::Unicode,
            IconChoice::Ascii => Self::Ascii,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Avatars ===

    pub fn user_avatar(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "\u{f007}",
            IconMode::Unicode => "◉",
            IconMode::Ascii => "[you]",
        }
    }

    pub fn bot_avatar(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰚩",
            IconMode::Unicode => "◈",
            IconMode::Ascii => "[bot]",
        }
    }

    // === Input bar controls ===

    pub fn send(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰒊 Send",
            IconMode::Unicode => "➤ Send",
            IconMode::Ascii => "Send",
        }
    }

    pub fn voice(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰍬",
            IconMode::Unicode | IconMode::Ascii => "Mic",
        }
    }

    pub fn download(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰇚",
            IconMode::Unicode | IconMode::Ascii => "Save",
        }
    }

    // === Typing indicator ===

    pub fn dot_active(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "●",
            IconMode::Ascii => "o",
        }
    }

    pub fn dot_idle(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "○",
            IconMode::Ascii => ".",
        }
    }

    // === Spinner Frames (for animation) ===

    pub fn spinner_frames(&self) -> &'static [&'static str] {
        match self.mode {
            IconMode::Nerd => &["󰪞", "󰪟", "󰪠", "󰪡", "󰪢", "󰪣"],
            IconMode::Unicode => &["◐", "◓", "◑", "◒"],
            IconMode::Ascii => &["|", "/", "-", "\\"],
        }
    }
}
