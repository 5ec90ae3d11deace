pub mod auth_mode;
pub mod calendar_mode;
pub mod sidebar_mode;

use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Focus, Screen};
use crate::store::EventStore;
use crate::view::Phase;

/// Routes a key press to the handler for the current screen and focus.
pub fn handle_key(key: KeyCode, state: &mut AppState, events: &EventStore) -> Action {
    match state.screen {
        Screen::Auth => auth_mode::handle_auth_key(key, state),
        Screen::Verify => auth_mode::handle_verify_key(key, state),
        Screen::Main => handle_main_key(key, state, events),
    }
}

fn handle_main_key(key: KeyCode, state: &mut AppState, events: &EventStore) -> Action {
    // Open modals and drags own the keyboard.
    if state.calendar.phase != Phase::Idle {
        return calendar_mode::handle_key(key, state, events);
    }

    match key {
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Sidebar => Focus::Calendar,
                Focus::Calendar => Focus::Sidebar,
            };
            Action::None
        }
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('L') => Action::SignOut,
        _ => match state.focus {
            Focus::Sidebar => sidebar_mode::handle_key(key, state),
            Focus::Calendar => calendar_mode::handle_key(key, state, events),
        },
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{all_day, context, main_app};
    use super::*;

    #[tokio::test]
    async fn tab_switches_focus_on_main_screen() {
        let ctx = context(vec![]);
        let mut app = main_app(&ctx).await;
        assert_eq!(app.focus, Focus::Calendar);

        let action = handle_key(KeyCode::Tab, &mut app, &ctx.events);

        assert_eq!(action, Action::None);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[tokio::test]
    async fn q_quits_from_idle_calendar() {
        let ctx = context(vec![]);
        let mut app = main_app(&ctx).await;

        assert_eq!(handle_key(KeyCode::Char('q'), &mut app, &ctx.events), Action::Quit);
    }

    #[tokio::test]
    async fn open_modal_captures_q_as_title_text() {
        let ctx = context(vec![]);
        let mut app = main_app(&ctx).await;
        handle_key(KeyCode::Char('a'), &mut app, &ctx.events);

        let action = handle_key(KeyCode::Char('q'), &mut app, &ctx.events);

        assert_eq!(action, Action::None);
        assert_eq!(app.calendar.create_title_mut().map(|t| t.clone()), Some("q".to_string()));
    }

    #[tokio::test]
    async fn r_reloads_current_calendar() {
        let ctx = context(vec![all_day("1", "Standup", 1)]);
        let mut app = main_app(&ctx).await;

        assert_eq!(handle_key(KeyCode::Char('r'), &mut app, &ctx.events), Action::Reload);
    }

    #[tokio::test]
    async fn shift_l_signs_out_from_main_screen() {
        let ctx = context(vec![]);
        let mut app = main_app(&ctx).await;

        assert_eq!(handle_key(KeyCode::Char('L'), &mut app, &ctx.events), Action::SignOut);
    }

    #[test]
    fn auth_screen_keys_edit_form() {
        let ctx = context(vec![]);
        let mut app = AppState::new(&ctx);

        handle_key(KeyCode::Char('q'), &mut app, &ctx.events);

        assert_eq!(app.auth_form.email, "q");
    }
}
