//! Conversation pane widget.

use gabble_engine::Message;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{BorderSet, IconSet, Theme};

use super::bubble::{message_lines, typing_line};
use super::scroll::TranscriptScroll;

/// Shown before the first message.
const EMPTY_HINT: &str = "Say hello to start a conversation.";

/// Scrollable transcript of the session.
///
/// ```text
/// ╭─ Conversation ─────────────────────────╮
/// │                          Hello  [you]  │
/// │                       09:41 AM         │
/// │                                        │
/// │ [bot]  Hi there!                       │
/// │       09:41 AM                         │
/// │                                        │
/// │ [bot]  o . .                           │
/// ╰────────────────────────────────────────╯
/// ```
pub struct ConversationPane<'a> {
    messages: &'a [Message],
    scroll: &'a TranscriptScroll,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    busy: bool,
    tick: usize,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(
        messages: &'a [Message],
        scroll: &'a TranscriptScroll,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            messages,
            scroll,
            theme,
            icons,
            borders,
            busy: false,
            tick: 0,
        }
    }

    /// Show the typing indicator, animated by `tick`.
    #[must_use]
    pub fn typing(mut self, busy: bool, tick: usize) -> Self {
        self.busy = busy;
        self.tick = tick;
        self
    }

    fn transcript_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(message_lines(message, width, self.theme, self.icons));
        }
        if self.busy {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(typing_line(self.tick, self.theme, self.icons));
        }
        lines
    }
}

impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.subtext))
            .borders(Borders::ALL)
            .border_set(self.borders.normal())
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.messages.is_empty() && !self.busy {
            self.scroll.set_limit(0);
            let hint_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
            Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .render(hint_area, buf);
            return;
        }

        let lines = self.transcript_lines(inner.width as usize);
        let height = inner.height as usize;
        let total = lines.len();

        self.scroll.set_limit(total.saturating_sub(height));
        let end = total - self.scroll.offset();
        let start = end.saturating_sub(height);

        let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(end - start).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;

    struct Fixture {
        theme: Theme,
        icons: IconSet,
        borders: BorderSet,
        scroll: TranscriptScroll,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                theme: Theme::default(),
                icons: IconSet::new(IconMode::Ascii),
                borders: BorderSet::new(IconMode::Ascii),
                scroll: TranscriptScroll::new(),
            }
        }

        fn render(&self, messages: &[Message], busy: bool, width: u16, height: u16) -> String {
            let area = Rect::new(0, 0, width, height);
            let mut buf = Buffer::empty(area);
            ConversationPane::new(messages, &self.scroll, &self.theme, &self.icons, &self.borders)
                .typing(busy, 0)
                .render(area, &mut buf);
            buffer_to_string(&buf)
        }
    }

    fn numbered(count: usize) -> Vec<Message> {
        (1..=count)
            .map(|i| {
                if i % 2 == 1 {
                    Message::user(format!("question {i}"))
                } else {
                    Message::bot(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_pane_shows_hint() {
        let fixture = Fixture::new();
        let output = fixture.render(&[], false, 60, 10);
        assert!(output.contains("Conversation"));
        assert!(output.contains(EMPTY_HINT));
    }

    #[test]
    fn test_messages_render_in_order() {
        let fixture = Fixture::new();
        let messages = vec![Message::user("Hello"), Message::bot("Hi there!")];
        let output = fixture.render(&messages, false, 60, 12);

        let hello = output.find("Hello").unwrap();
        let reply = output.find("Hi there!").unwrap();
        assert!(hello < reply);
        assert!(output.contains("[you]"));
        assert!(output.contains("[bot]"));
        assert!(!output.contains(EMPTY_HINT));
    }

    #[test]
    fn test_typing_indicator_only_while_busy() {
        let fixture = Fixture::new();
        let messages = vec![Message::user("Hello")];

        let idle = fixture.render(&messages, false, 60, 12);
        assert!(!idle.contains("o . ."));

        let busy = fixture.render(&messages, true, 60, 12);
        assert!(busy.contains("o . ."));
    }

    #[test]
    fn test_follows_newest_message() {
        let fixture = Fixture::new();
        let messages = numbered(10);
        let output = fixture.render(&messages, false, 60, 10);

        assert!(output.contains("answer 10"));
        assert!(!output.contains("question 1 "));
        assert!(fixture.scroll.is_following());
    }

    #[test]
    fn test_scrolled_view_shows_older_messages() {
        let mut fixture = Fixture::new();
        let messages = numbered(10);
        // First render records how far back the view can go.
        fixture.render(&messages, false, 60, 10);
        fixture.scroll.to_top();

        let output = fixture.render(&messages, false, 60, 10);
        assert!(output.contains("question 1"));
        assert!(!output.contains("answer 10"));
    }
}
