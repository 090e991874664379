//! Screen definitions for the gabble TUI.

pub mod chat;

use crate::app::App;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    use crate::ui::centered_fixed;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Chat
    Enter             Send message
    Left/Right        Move cursor
    Up/Down           Previous/next input
    PgUp/PgDn         Scroll transcript
    Ctrl+Home/End     Oldest/newest message
    Ctrl+L            New conversation

  General
    F1 or ?           Toggle this help
    Esc               Clear input / quit
    Ctrl+C            Quit

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme.primary))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface).fg(theme.text));

    Paragraph::new(help_text).block(block).render(overlay_area, buf);
}
