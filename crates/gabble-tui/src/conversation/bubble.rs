//! Message bubble layout.
//!
//! Each message becomes a block of pre-wrapped lines: the bubble rows with
//! an avatar on the first row, then a muted time label. User messages sit
//! on the right, bot messages on the left.

use gabble_engine::Message;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{IconSet, Theme};

/// Smallest wrap width, so narrow panes still show text.
const MIN_TEXT_WIDTH: usize = 8;

/// Columns a bubble may use for text within a pane `width` wide.
fn text_width(width: usize, avatar: &str) -> usize {
    // One space of padding on each side plus the gap to the avatar.
    (width * 3 / 4)
        .saturating_sub(avatar.width() + 3)
        .max(MIN_TEXT_WIDTH)
}

/// Lay out one message as display lines.
pub fn message_lines(
    message: &Message,
    width: usize,
    theme: &Theme,
    icons: &IconSet,
) -> Vec<Line<'static>> {
    let (avatar, avatar_style, bubble_style) = if message.is_user() {
        (
            icons.user_avatar(),
            Style::default().fg(theme.primary),
            Style::default().bg(theme.user_bubble).fg(theme.text),
        )
    } else {
        (
            icons.bot_avatar(),
            Style::default().fg(theme.secondary),
            Style::default().bg(theme.bot_bubble).fg(theme.text),
        )
    };

    let wrapped = textwrap::wrap(&message.text, text_width(width, avatar));
    let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    let blank_avatar = " ".repeat(avatar.width());

    let mut lines: Vec<Line<'static>> = wrapped
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let pad = " ".repeat(inner - row.width());
            let bubble = Span::styled(format!(" {row}{pad} "), bubble_style);
            let face = if i == 0 {
                Span::styled(avatar, avatar_style)
            } else {
                Span::raw(blank_avatar.clone())
            };
            if message.is_user() {
                Line::from(vec![bubble, Span::raw(" "), face]).alignment(Alignment::Right)
            } else {
                Line::from(vec![face, Span::raw(" "), bubble])
            }
        })
        .collect();

    let label = Span::styled(message.time_label(), Style::default().fg(theme.muted));
    let indent = Span::raw(format!("{blank_avatar} "));
    lines.push(if message.is_user() {
        Line::from(vec![label, indent]).alignment(Alignment::Right)
    } else {
        Line::from(vec![indent, label])
    });

    lines
}

/// The animated three-dot block shown while a reply is outstanding.
pub fn typing_line(tick: usize, theme: &Theme, icons: &IconSet) -> Line<'static> {
    let bubble = Style::default().bg(theme.bot_bubble);
    let mut spans = vec![
        Span::styled(icons.bot_avatar(), Style::default().fg(theme.secondary)),
        Span::raw(" "),
        Span::styled(" ", bubble),
    ];
    let active = tick % 3;
    for i in 0..3 {
        let (dot, fg) = if i == active {
            (icons.dot_active(), theme.primary)
        } else {
            (icons.dot_idle(), theme.muted)
        };
        spans.push(Span::styled(dot, bubble.fg(fg)));
        spans.push(Span::styled(" ", bubble));
    }
    Line::from(spans)
}
