use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use lifesync::{
    app::{AppContext, AppState, Focus, Screen},
    view::Phase,
};

use crate::tui::{auth_screen, dialogs, month_grid, sidebar};

pub fn ui(f: &mut Frame, app: &AppState, ctx: &AppContext) {
    match app.screen {
        Screen::Auth | Screen::Verify => auth_screen::render(f, app),
        Screen::Main => render_main(f, app, ctx),
    }
}

fn render_main(f: &mut Frame, app: &AppState, ctx: &AppContext) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(main_chunks[1]);

    let identity = ctx.auth.identity();
    let calendar_label = app.calendar.calendar_id().unwrap_or("no calendar");
    let title_text = if identity.is_authenticated() {
        format!("lifesync - {} - {}", calendar_label, identity.email)
    } else {
        format!("lifesync - {}", calendar_label)
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    sidebar::render(f, app, content_chunks[0], app.focus == Focus::Sidebar);
    month_grid::render(f, app, &ctx.events, content_chunks[1], app.focus == Focus::Calendar);

    render_status(f, app, main_chunks[2]);

    match &app.calendar.phase {
        Phase::CreateModalOpen { dates, title } => dialogs::create_event::render(f, app, dates, title),
        Phase::DeleteModalOpen { event_id } => {
            let event = ctx.events.find(event_id);
            dialogs::delete_confirmation::render(f, app, event.as_ref());
        }
        _ => {}
    }
}

pub(crate) fn render_status(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let line = match &app.status {
        Some(status) => {
            let color = if status.is_error() { app.theme.error } else { app.theme.success };
            Line::from(Span::styled(status.message(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "Tab = Switch pane | r = Reload | L = Sign out | q = Quit",
            Style::default().fg(app.theme.status_bar),
        )),
    };

    let status = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
