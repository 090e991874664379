//! Single-line text input widget.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// A single-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Whether the input is focused.
    focused: bool,
    /// Placeholder text.
    placeholder: Option<&'a str>,
    /// Prompt prefix.
    prompt: &'a str,
    theme: &'a Theme,
}

impl<'a> TextInput<'a> {
    /// Create a new text input over `content`.
    pub fn new(content: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            content,
            cursor,
            focused: true,
            placeholder: None,
            prompt: "> ",
            theme,
        }
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// First character to draw so the cursor stays inside `width` columns.
    fn scroll_start(&self, chars: &[char], width: usize) -> usize {
        let cursor = self.cursor.min(chars.len());
        let mut start = cursor;
        let mut used = 0;
        while start > 0 {
            let w = chars[start - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let text_style = Style::default().fg(self.theme.text);
        let cursor_style = Style::default().fg(self.theme.primary);
        let mut spans = vec![Span::styled(self.prompt, cursor_style)];

        if self.content.is_empty() {
            if self.focused {
                spans.push(Span::styled("_", cursor_style));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Style::default().fg(self.theme.muted)));
            }
            Paragraph::new(Line::from(spans)).render(area, buf);
            return;
        }

        let chars: Vec<char> = self.content.chars().collect();
        // Leave one column for the trailing cursor.
        let room = (area.width as usize).saturating_sub(self.prompt.len() + 1);
        let start = self.scroll_start(&chars, room);

        let before: String = chars[start..self.cursor.min(chars.len())].iter().collect();
        let after: String = chars[self.cursor.min(chars.len())..].iter().collect();

        spans.push(Span::styled(before, text_style));
        if self.focused {
            let marker = if after.is_empty() { "_" } else { "|" };
            spans.push(Span::styled(marker, cursor_style));
        }
        spans.push(Span::styled(after, text_style));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Submitted entries, oldest first.
    history: Vec<String>,
    /// Position while browsing history (`None` = editing fresh input).
    history_index: Option<usize>,
    /// Fresh input saved while browsing history.
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether Up/Down are currently walking the history.
    pub fn is_browsing_history(&self) -> bool {
        self.history_index.is_some()
    }

    /// Check if the content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor position. Line breaks are ignored.
    pub fn insert(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
        self.stop_browsing();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert(ch);
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
            self.stop_browsing();
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
            self.stop_browsing();
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// An edited history entry becomes fresh input.
    fn stop_browsing(&mut self) {
        self.history_index = None;
        self.saved_input.clear();
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor = self.char_len();
    }

    /// Take the content into history and clear.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };
        self.history_index = Some(next);
        let entry = self.history[self.history.len() - 1 - next].clone();
        self.set_content(entry);
    }

    /// Navigate to next history entry.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                let saved = std::mem::take(&mut self.saved_input);
                self.set_content(saved);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                let entry = self.history[self.history.len() - i].clone();
                self.set_content(entry);
            }
        }
    }

    /// Create a widget from this state.
    pub fn widget<'a>(&'a self, theme: &'a Theme) -> TextInput<'a> {
        TextInput::new(&self.content, self.cursor, theme)
    }
}
