use crate::application::{App, Focus, LookupRequest};
use crossterm::event::{KeyCode, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
pub enum InputOutcome {
    Continue,
    Quit,
    Lookup(LookupRequest),
}

impl From<Option<LookupRequest>> for InputOutcome {
    fn from(request: Option<LookupRequest>) -> Self {
        match request {
            Some(request) => InputOutcome::Lookup(request),
            None => InputOutcome::Continue,
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> InputOutcome {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('c') => return InputOutcome::Quit,
                KeyCode::Char('u') => {
                    app.clear_input();
                    return InputOutcome::Continue;
                }
                _ => {}
            }
        }

        if app.help_visible {
            Self::handle_help_mode(app, key);
            return InputOutcome::Continue;
        }

        match key {
            KeyCode::Esc => return InputOutcome::Quit,
            KeyCode::F(1) => {
                app.toggle_help();
                return InputOutcome::Continue;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                app.toggle_focus();
                return InputOutcome::Continue;
            }
            _ => {}
        }

        match app.focus {
            Focus::Input => Self::handle_input_focus(app, key),
            Focus::Submit => Self::handle_submit_focus(app, key),
        }
    }

    fn handle_input_focus(app: &mut App, key: KeyCode) -> InputOutcome {
        match key {
            // The confirm key bypasses the disabled submit control.
            KeyCode::Enter => return app.submit_search().into(),
            KeyCode::Backspace => app.delete_before_cursor(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
        InputOutcome::Continue
    }

    fn handle_submit_focus(app: &mut App, key: KeyCode) -> InputOutcome {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => app.press_submit().into(),
            KeyCode::Char(c) => {
                app.focus = Focus::Input;
                app.move_cursor_end();
                app.insert_char(c);
                InputOutcome::Continue
            }
            KeyCode::Backspace => {
                app.focus = Focus::Input;
                app.move_cursor_end();
                app.delete_before_cursor();
                InputOutcome::Continue
            }
            _ => InputOutcome::Continue,
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.toggle_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
