use crossterm::event::KeyCode;

use crate::app::{Action, AppState};
use crate::view::{AccordionRow, PageEntry};

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Char('j') | KeyCode::Down => {
            state.accordion.move_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.accordion.move_up();
            Action::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate(state),
        _ => Action::None,
    }
}

fn activate(state: &mut AppState) -> Action {
    let Some(row) = state.accordion.current_row() else {
        return Action::None;
    };

    match row {
        AccordionRow::Header(index) => {
            state.accordion.toggle(index);
            Action::None
        }
        AccordionRow::Content(..) => match state.accordion.content_at(row) {
            Some(PageEntry::Calendar(id)) => Action::OpenCalendar(id.clone()),
            Some(PageEntry::AddButton(label)) => {
                let label = label.clone();
                state.info(format!("{label}: not available yet"));
                Action::None
            }
            Some(PageEntry::Text(_)) | None => Action::None,
        },
    }
}
