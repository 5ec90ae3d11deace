use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use lifesync::{app::AppState, calendar::CalendarEvent};

use super::centered_rect;

pub fn render(f: &mut Frame, app: &AppState, event: Option<&CalendarEvent>) {
    let event_title = event.map(|e| e.title.as_str()).unwrap_or("this event");

    let area = centered_rect(60, 10, f.size());
    f.render_widget(Clear, area);

    let dialog_text = vec![
        Line::from(vec![Span::styled(
            "Delete Event?",
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Are you sure you want to delete "),
            Span::styled(event_title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from("This action cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green)),
            Span::raw(" = Yes, delete | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = No, cancel"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Delete ")
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, area);
}
