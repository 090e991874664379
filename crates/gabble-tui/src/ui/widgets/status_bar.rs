//! Status bar widget.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar widget displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: Vec<KeyHint>,
    right_text: Option<&'a str>,
    right_style: Option<Style>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(mode: &'a str, theme: &'a Theme) -> Self {
        Self {
            mode,
            hints: Vec::new(),
            right_text: None,
            right_style: None,
            theme,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }

    /// Override the style of the right-aligned text.
    #[must_use]
    pub fn right_style(mut self, style: Style) -> Self {
        self.right_style = Some(style);
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let bar_style = Style::default().bg(self.theme.surface).fg(self.theme.subtext);

        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_style(bar_style);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.mode),
                Style::default()
                    .bg(self.theme.primary)
                    .fg(self.theme.base)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", bar_style),
        ];

        // Right text wins over hints when space is short.
        let right_width = self.right_text.map_or(0, |t| t.width() as u16 + 1);
        let left_room = area.width.saturating_sub(right_width) as usize;

        let key_style = Style::default()
            .bg(self.theme.overlay)
            .fg(self.theme.text)
            .add_modifier(Modifier::BOLD);
        let mut used: usize = spans.iter().map(Span::width).sum();
        for hint in &self.hints {
            let key = format!(" {} ", hint.key);
            let label = format!(" {} ", hint.label);
            // Hints are shown whole or not at all.
            let width = key.width() + label.width();
            if used + width > left_room {
                break;
            }
            used += width;
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(label, bar_style));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), left_room as u16);

        if let Some(text) = self.right_text {
            if right_width <= area.width {
                let x = area.x + area.width - right_width;
                buf.set_string(x, area.y, text, self.right_style.unwrap_or(bar_style));
            }
        }
    }
}
