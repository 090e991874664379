//! gabble-tui: Terminal chat screen for gabble
//!
//! This crate provides the TUI layer for gabble, including:
//! - The chat screen with transcript, input bar and status bar
//! - Message bubbles, typing indicator and transcript scrolling
//! - Help overlay, themes and icon sets

mod app;
mod conversation;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod theme;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use gabble_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gabble_engine::{ChatBackend, Config, DispatchError, PendingTurn};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use screens::chat::{ChatLayout, ChatScreen};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// A dispatched turn and the task producing its reply.
struct InFlight {
    turn: PendingTurn,
    handle: JoinHandle<Result<String, DispatchError>>,
}

impl InFlight {
    fn spawn(turn: PendingTurn, backend: &Arc<dyn ChatBackend>) -> Self {
        let backend = Arc::clone(backend);
        let prompt = turn.prompt.clone();
        let handle = tokio::spawn(async move { backend.generate(&prompt).await });
        Self { turn, handle }
    }

    /// Wait for the reply. A panicked or aborted task counts as a transport failure.
    async fn outcome(self) -> (PendingTurn, Result<String, DispatchError>) {
        let outcome = match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DispatchError::Transport(e.to_string())),
        };
        (self.turn, outcome)
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(
    config: &Config,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let mut app = App::new(config, backend.model_name());
    info!(model = %app.model_name, "chat screen opened");

    // 4 Hz drives the typing animation
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &backend).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    backend: &Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut in_flight: Option<InFlight> = None;
    let mut screen_area = Rect::default();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screen_area = area;
            let buf = frame.buffer_mut();

            ChatScreen.render(app, area, buf);

            if app.show_help {
                screens::render_help_overlay(area, buf, &app.theme);
            }
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if !handle_chat_key(app, key, backend, &mut in_flight) {
                        let action = event::key_to_action(key);
                        if action == Action::NewConversation {
                            abort(&mut in_flight);
                        }
                        app.handle_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let layout = ChatLayout::new(screen_area, &app.icons);
                        if let Some(control) = layout.hit_test(mouse.column, mouse.row) {
                            if let Some(turn) = app.handle_control(control) {
                                in_flight = Some(InFlight::spawn(turn, backend));
                            }
                        }
                    } else {
                        app.handle_action(event::mouse_to_action(mouse));
                    }
                }
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if in_flight.as_ref().is_some_and(|f| f.handle.is_finished()) {
            if let Some(flight) = in_flight.take() {
                let (turn, outcome) = flight.outcome().await;
                app.finish_turn(&turn, outcome);
            }
        }

        if app.should_quit {
            abort(&mut in_flight);
            break;
        }
    }

    Ok(())
}

fn abort(in_flight: &mut Option<InFlight>) {
    if let Some(flight) = in_flight.take() {
        debug!("abandoning outstanding request");
        flight.handle.abort();
    }
}

/// Handle a key aimed at the input bar. Returns true if the key was consumed.
fn handle_chat_key(
    app: &mut App,
    key: KeyEvent,
    backend: &Arc<dyn ChatBackend>,
    in_flight: &mut Option<InFlight>,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if app.show_help {
        // Any key except quit closes the overlay
        if ctrl && key.code == KeyCode::Char('c') {
            return false;
        }
        app.show_help = false;
        return true;
    }

    match key.code {
        KeyCode::Enter => {
            // Shift+Enter would be a line break; the input is single-line
            if !key.modifiers.contains(KeyModifiers::SHIFT) {
                if let Some(turn) = app.submit_input() {
                    *in_flight = Some(InFlight::spawn(turn, backend));
                }
            }
            true
        }
        KeyCode::Char('?') if app.input_state.is_empty() => false,
        KeyCode::Char(c) if !ctrl && !alt => {
            app.input_state.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input_state.backspace();
            true
        }
        KeyCode::Delete => {
            app.input_state.delete();
            true
        }
        KeyCode::Left => {
            app.input_state.move_left();
            true
        }
        KeyCode::Right => {
            app.input_state.move_right();
            true
        }
        KeyCode::Home if !ctrl => {
            app.input_state.move_home();
            true
        }
        KeyCode::End if !ctrl => {
            app.input_state.move_end();
            true
        }
        KeyCode::Up => {
            if app.input_state.is_empty() || app.input_state.is_browsing_history() {
                app.input_state.history_prev();
            } else {
                app.handle_action(Action::ScrollUp(1));
            }
            true
        }
        KeyCode::Down => {
            if app.input_state.is_browsing_history() {
                app.input_state.history_next();
            } else {
                app.handle_action(Action::ScrollDown(1));
            }
            true
        }
        _ => false,
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use gabble_engine::{Role, APOLOGY};

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        fn model_name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, DispatchError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        fn model_name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, DispatchError> {
            Err(DispatchError::Status(500))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        key_with(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str, backend: &Arc<dyn ChatBackend>) {
        let mut none = None;
        for c in text.chars() {
            assert!(handle_chat_key(app, key(KeyCode::Char(c)), backend, &mut none));
        }
        assert!(none.is_none());
    }

    async fn settle(app: &mut App, in_flight: &mut Option<InFlight>) {
        if let Some(flight) = in_flight.take() {
            let (turn, outcome) = flight.outcome().await;
            app.finish_turn(&turn, outcome);
        }
    }

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
    }

    #[tokio::test]
    async fn test_enter_dispatches_one_turn() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        type_text(&mut app, "Hello", &backend);
        assert!(handle_chat_key(&mut app, key(KeyCode::Enter), &backend, &mut in_flight));

        assert!(in_flight.is_some());
        assert!(app.input_state.is_empty());
        assert!(app.session.is_busy());
        assert_eq!(app.session.messages().len(), 1);

        settle(&mut app, &mut in_flight).await;
        let messages = app.session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Bot);
        assert_eq!(messages[1].text, "echo: Hello");
        assert!(!app.session.is_busy());
    }

    #[tokio::test]
    async fn test_failed_turn_shows_apology() {
        let backend: Arc<dyn ChatBackend> = Arc::new(FailingBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        type_text(&mut app, "Hello", &backend);
        handle_chat_key(&mut app, key(KeyCode::Enter), &backend, &mut in_flight);
        settle(&mut app, &mut in_flight).await;

        assert_eq!(app.session.messages()[1].text, APOLOGY);
    }

    #[tokio::test]
    async fn test_enter_while_busy_keeps_input() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        type_text(&mut app, "first", &backend);
        handle_chat_key(&mut app, key(KeyCode::Enter), &backend, &mut in_flight);
        type_text(&mut app, "second", &backend);

        let mut second = None;
        handle_chat_key(&mut app, key(KeyCode::Enter), &backend, &mut second);
        assert!(second.is_none());
        assert_eq!(app.input_state.content(), "second");
        assert!(app.notification().is_some());

        settle(&mut app, &mut in_flight).await;
        assert_eq!(app.session.messages().len(), 2);
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        type_text(&mut app, "   ", &backend);
        handle_chat_key(&mut app, key(KeyCode::Enter), &backend, &mut in_flight);
        assert!(in_flight.is_none());
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn test_shift_enter_does_not_submit() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        type_text(&mut app, "Hello", &backend);
        let consumed = handle_chat_key(
            &mut app,
            key_with(KeyCode::Enter, KeyModifiers::SHIFT),
            &backend,
            &mut in_flight,
        );
        assert!(consumed);
        assert!(in_flight.is_none());
        assert_eq!(app.input_state.content(), "Hello");
    }

    #[test]
    fn test_question_mark_opens_help_only_on_empty_input() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        assert!(!handle_chat_key(&mut app, key(KeyCode::Char('?')), &backend, &mut in_flight));

        type_text(&mut app, "why", &backend);
        assert!(handle_chat_key(&mut app, key(KeyCode::Char('?')), &backend, &mut in_flight));
        assert_eq!(app.input_state.content(), "why?");
    }

    #[test]
    fn test_any_key_closes_help() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;
        app.show_help = true;

        assert!(handle_chat_key(&mut app, key(KeyCode::Char('x')), &backend, &mut in_flight));
        assert!(!app.show_help);
        assert!(app.input_state.is_empty());
    }

    #[test]
    fn test_ctrl_keys_fall_through() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        let mut in_flight = None;

        let ctrl_l = key_with(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert!(!handle_chat_key(&mut app, ctrl_l, &backend, &mut in_flight));
        assert_eq!(event::key_to_action(ctrl_l), Action::NewConversation);
        assert!(app.input_state.is_empty());
    }

    #[test]
    fn test_up_recalls_history_on_empty_input() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        app.input_state.insert_str("earlier");
        app.input_state.submit();

        let mut in_flight = None;
        handle_chat_key(&mut app, key(KeyCode::Up), &backend, &mut in_flight);
        assert_eq!(app.input_state.content(), "earlier");

        handle_chat_key(&mut app, key(KeyCode::Down), &backend, &mut in_flight);
        assert!(app.input_state.is_empty());
    }

    #[test]
    fn test_up_scrolls_after_editing_recalled_input() {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend);
        let mut app = App::new_for_test();
        app.input_state.insert_str("earlier");
        app.input_state.submit();

        let mut in_flight = None;
        handle_chat_key(&mut app, key(KeyCode::Up), &backend, &mut in_flight);
        type_text(&mut app, "!", &backend);
        handle_chat_key(&mut app, key(KeyCode::Up), &backend, &mut in_flight);

        assert_eq!(app.input_state.content(), "earlier!");
        assert!(!app.input_state.is_browsing_history());
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::test_utils::*;
    use insta::assert_snapshot;
    use ratatui::buffer::Buffer;

    /// Message times come from the local clock.
    fn snapshot(name: &str, rendered: &str) {
        insta::with_settings!({filters => vec![(r"\d{2}:\d{2} [AP]M", "[time]")]}, {
            assert_snapshot!(name, rendered);
        });
    }

    fn render_with_help(app: &App) -> String {
        let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
        let mut buf = Buffer::empty(area);
        ChatScreen.render(app, area, &mut buf);
        screens::render_help_overlay(area, &mut buf, &app.theme);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_snapshot_empty_chat() {
        let app = create_test_app();
        let result = render_screen_to_string(&ChatScreen, &app);
        snapshot("empty_chat", &result);
    }

    #[test]
    fn test_snapshot_waiting_for_reply() {
        let mut app = create_test_app();
        app.input_state.insert_str("Hello");
        let _turn = app.submit_input();
        let result = render_screen_to_string(&ChatScreen, &app);
        snapshot("waiting_for_reply", &result);
    }

    #[test]
    fn test_snapshot_reply_received() {
        let mut app = create_test_app();
        app.input_state.insert_str("Hello");
        let turn = app.submit_input().unwrap();
        app.finish_turn(&turn, Ok("Hi there!".to_string()));
        let result = render_screen_to_string(&ChatScreen, &app);
        snapshot("reply_received", &result);
    }

    #[test]
    fn test_snapshot_help_overlay() {
        let mut app = create_test_app();
        app.show_help = true;
        let result = render_with_help(&app);
        snapshot("help_overlay", &result);
    }
}
