use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppState};

/// What the event loop should do with a key press while chatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    None,
    /// Dispatch this query to the server.
    Send(String),
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> ChatAction {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => {
            if let Some(query) = app.submit() {
                return ChatAction::Send(query);
            }
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.push_char(c);
            }
        }
        _ => {}
    }
    ChatAction::None
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_builds_the_input() {
        let mut app = App::new();
        for c in "hi".chars() {
            handle_chat_input(key(KeyCode::Char(c)), &mut app);
        }
        assert_eq!(app.input, "hi");
        handle_chat_input(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "h");
    }

    #[test]
    fn enter_on_empty_input_sends_nothing() {
        let mut app = App::new();
        assert_eq!(handle_chat_input(key(KeyCode::Enter), &mut app), ChatAction::None);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn enter_dispatches_the_pending_text() {
        let mut app = App::new();
        app.input = "hello".to_string();
        assert_eq!(
            handle_chat_input(key(KeyCode::Enter), &mut app),
            ChatAction::Send("hello".to_string())
        );
    }

    #[test]
    fn ctrl_c_asks_for_confirmation() {
        let mut app = App::new();
        handle_chat_input(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert_eq!(app.state, AppState::QuitConfirm);

        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.state, AppState::Chat);

        handle_chat_input(key(KeyCode::Esc), &mut app);
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert_eq!(app.state, AppState::Quit);
    }
}
