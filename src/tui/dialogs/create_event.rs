use chrono::Days;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use lifesync::{app::AppState, view::SelectedDates};

use super::centered_rect;

pub fn render(f: &mut Frame, app: &AppState, dates: &SelectedDates, title: &str) {
    let area = centered_rect(60, 10, f.size());
    f.render_widget(Clear, area);

    // `end` is exclusive; show the last covered day.
    let last_day = dates.end.checked_sub_days(Days::new(1)).unwrap_or(dates.start);
    let range = if last_day == dates.start {
        dates.start.format("%a %d %b %Y").to_string()
    } else {
        format!("{} to {}", dates.start.format("%a %d %b"), last_day.format("%a %d %b %Y"))
    };

    let text = vec![
        Line::from(Span::styled(
            "Create New Event",
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Dates: ", Style::default().fg(Color::DarkGray)),
            Span::raw(range),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(app.theme.selected_bg)),
            Span::raw(title.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Save | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" New Event ")
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(dialog, area);
}
