//! The chat screen: transcript, input bar and status bar.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::Screen;
use crate::app::App;
use crate::conversation::ConversationPane;
use crate::theme::IconSet;
use crate::ui::{main_layout, KeyHint, StatusBar};

/// Height of the input bar including its border.
const INPUT_BAR_HEIGHT: u16 = 3;

/// Clickable controls in the input bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Voice,
    Download,
    Send,
}

/// Screen regions, shared by rendering and mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub transcript: Rect,
    pub input_bar: Rect,
    pub input: Rect,
    pub voice: Rect,
    pub download: Rect,
    pub send: Rect,
    pub status: Rect,
}

#[allow(clippy::cast_possible_truncation)]
fn button_width(label: &str) -> u16 {
    label.width() as u16 + 2
}

impl ChatLayout {
    pub fn new(area: Rect, icons: &IconSet) -> Self {
        let (main, status) = main_layout(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(INPUT_BAR_HEIGHT)])
            .split(main);
        let (transcript, input_bar) = (rows[0], rows[1]);

        let inner = input_bar.inner(Margin::new(1, 1));
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(button_width(icons.voice())),
                Constraint::Length(button_width(icons.download())),
                Constraint::Length(button_width(icons.send())),
            ])
            .split(inner);

        Self {
            transcript,
            input_bar,
            input: cols[0],
            voice: cols[1],
            download: cols[2],
            send: cols[3],
            status,
        }
    }

    /// The control under a mouse position, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Control> {
        let pos = Position::new(column, row);
        [
            (self.send, Control::Send),
            (self.voice, Control::Voice),
            (self.download, Control::Download),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, control)| control)
    }
}

/// Chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = ChatLayout::new(area, &app.icons);
        let busy = app.session.is_busy();

        ConversationPane::new(
            app.session.messages(),
            &app.scroll,
            &app.theme,
            &app.icons,
            &app.borders,
        )
        .typing(busy, app.tick)
        .render(layout.transcript, buf);

        render_input_bar(app, &layout, buf);
        render_status_bar(app, layout.status, buf);
    }
}

fn render_input_bar(app: &App, layout: &ChatLayout, buf: &mut Buffer) {
    let theme = &app.theme;
    let accepting = !app.session.is_busy();
    let (border_set, border_color) = if accepting {
        (app.borders.focused(), theme.border_focused)
    } else {
        (app.borders.normal(), theme.border)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_set(border_set)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.base))
        .render(layout.input_bar, buf);

    app.input_state
        .widget(theme)
        .focused(!app.show_help)
        .placeholder("Type a message...")
        .render(layout.input, buf);

    let aux = Style::default().fg(theme.subtext);
    buf.set_string(layout.voice.x, layout.voice.y, format!(" {} ", app.icons.voice()), aux);
    buf.set_string(
        layout.download.x,
        layout.download.y,
        format!(" {} ", app.icons.download()),
        aux,
    );

    let send_style = if app.can_send() {
        Style::default()
            .bg(theme.primary)
            .fg(theme.base)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
    };
    buf.set_string(
        layout.send.x,
        layout.send.y,
        format!(" {} ", app.icons.send()),
        send_style,
    );
}

fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let hints = vec![
        KeyHint::new("Enter", "Send"),
        KeyHint::new("PgUp/PgDn", "Scroll"),
        KeyHint::new("Ctrl+L", "New"),
        KeyHint::new("F1", "Help"),
        KeyHint::new("Ctrl+C", "Quit"),
    ];

    let (right, style) = if let Some(note) = app.notification() {
        (note.to_string(), Style::default().fg(app.theme.warning))
    } else if app.session.is_busy() {
        let frames = app.icons.spinner_frames();
        let frame = frames[app.tick % frames.len()];
        (
            format!("{frame} {}", app.model_name),
            Style::default().fg(app.theme.secondary),
        )
    } else {
        (app.model_name.clone(), Style::default().fg(app.theme.subtext))
    };

    StatusBar::new("Chat", &app.theme)
        .hints(hints)
        .right(&right)
        .right_style(style)
        .render(area, buf);
}
