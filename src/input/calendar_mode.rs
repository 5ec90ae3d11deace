use crossterm::event::KeyCode;

use crate::app::{Action, AppState};
use crate::store::EventStore;
use crate::view::{Phase, SelectedDates};

pub fn handle_key(key: KeyCode, state: &mut AppState, events: &EventStore) -> Action {
    match state.calendar.phase {
        Phase::Idle => handle_idle(key, state, events),
        Phase::SelectingRange { .. } => handle_selecting(key, state),
        Phase::CreateModalOpen { .. } => handle_create_modal(key, state),
        Phase::DeleteModalOpen { .. } => handle_delete_modal(key, state),
        Phase::Dragging { .. } => handle_dragging(key, state),
    }
}

fn handle_idle(key: KeyCode, state: &mut AppState, events: &EventStore) -> Action {
    let calendar = &mut state.calendar;
    match key {
        KeyCode::Char('h') | KeyCode::Left => calendar.move_cursor_days(-1),
        KeyCode::Char('l') | KeyCode::Right => calendar.move_cursor_days(1),
        KeyCode::Char('j') | KeyCode::Down => calendar.move_cursor_days(7),
        KeyCode::Char('k') | KeyCode::Up => calendar.move_cursor_days(-7),
        KeyCode::Char('{') => calendar.move_cursor_months(-1),
        KeyCode::Char('}') => calendar.move_cursor_months(1),
        KeyCode::Char('t') => calendar.jump_to_today(),
        KeyCode::Char('n') => calendar.cycle_event_selection(events),
        KeyCode::Char('v') => calendar.begin_selection(),
        KeyCode::Char('a') => {
            if let Some(dates) = SelectedDates::spanning(calendar.cursor, calendar.cursor) {
                calendar.select_range(dates);
            }
        }
        KeyCode::Enter | KeyCode::Char('x') => match calendar.selected_event(events) {
            Some(event) => calendar.click_event(event.id),
            None => state.info("No event on this day"),
        },
        KeyCode::Char('m') => match calendar.selected_event(events) {
            Some(event) => {
                calendar.begin_drag(event.id);
                state.info("Moving event: h/l/j/k to shift, Enter to drop, Esc to cancel");
            }
            None => state.info("No event on this day"),
        },
        _ => {}
    }
    Action::None
}

fn handle_selecting(key: KeyCode, state: &mut AppState) -> Action {
    let calendar = &mut state.calendar;
    match key {
        KeyCode::Char('h') | KeyCode::Left => calendar.move_cursor_days(-1),
        KeyCode::Char('l') | KeyCode::Right => calendar.move_cursor_days(1),
        KeyCode::Char('j') | KeyCode::Down => calendar.move_cursor_days(7),
        KeyCode::Char('k') | KeyCode::Up => calendar.move_cursor_days(-7),
        KeyCode::Enter => calendar.finish_selection(),
        KeyCode::Esc => calendar.cancel_create(),
        _ => {}
    }
    Action::None
}

fn handle_create_modal(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Enter => return Action::SubmitCreate,
        KeyCode::Esc => state.calendar.cancel_create(),
        KeyCode::Backspace => {
            if let Some(title) = state.calendar.create_title_mut() {
                title.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(title) = state.calendar.create_title_mut() {
                title.push(c);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_delete_modal(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Esc => {
            state.calendar.cancel_delete();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_dragging(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.calendar.nudge_drag(-1),
        KeyCode::Char('l') | KeyCode::Right => state.calendar.nudge_drag(1),
        KeyCode::Char('j') | KeyCode::Down => state.calendar.nudge_drag(7),
        KeyCode::Char('k') | KeyCode::Up => state.calendar.nudge_drag(-7),
        KeyCode::Enter => return Action::DropEvent,
        KeyCode::Esc => {
            state.calendar.cancel_drag();
            state.status = None;
        }
        _ => {}
    }
    Action::None
}
