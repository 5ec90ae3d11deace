use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Screen};

/// Sign-in and registration form.
pub fn handle_auth_key(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            state.auth_form.next_field();
            Action::None
        }
        KeyCode::F(2) => {
            state.auth_form.toggle_mode();
            state.status = None;
            Action::None
        }
        KeyCode::Enter => Action::SubmitAuth,
        KeyCode::Backspace => {
            state.auth_form.pop_char();
            Action::None
        }
        KeyCode::Char(c) => {
            state.auth_form.push_char(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Verification code cells shown after registering.
pub fn handle_verify_key(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Esc => {
            state.screen = Screen::Auth;
            state.code_form.clear();
            state.status = None;
            Action::None
        }
        KeyCode::Enter => Action::SubmitVerificationCode,
        KeyCode::Char('r') => Action::SendVerificationCode,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            state.code_form.enter_digit(c);
            Action::None
        }
        KeyCode::Backspace => {
            state.code_form.backspace();
            Action::None
        }
        KeyCode::Left => {
            state.code_form.move_left();
            Action::None
        }
        KeyCode::Right => {
            state.code_form.move_right();
            Action::None
        }
        _ => Action::None,
    }
}
