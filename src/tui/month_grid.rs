use chrono::{Datelike, Local, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use lifesync::{
    app::AppState,
    calendar::{parse_hex_color, CalendarEvent},
    store::EventStore,
    ui::month_view::{self, GridState},
    view::Phase,
};

const MAX_DOTS: usize = 3;

pub fn render(f: &mut Frame, app: &AppState, store: &EventStore, area: Rect, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    let events = events_with_drag_preview(app, store);
    let layout = month_view::calculate_layout(&GridState {
        cursor: app.calendar.cursor,
        today: Local::now().date_naive(),
        selection: app.calendar.selection(),
        events: &events,
    });

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let header_style = Style::default().fg(app.theme.weekday_header);
    let mut lines = vec![
        Line::from(Span::styled(
            month_name,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .iter()
                .map(|day| Span::styled(format!(" {:<6}", day), header_style))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let mut spans = Vec::new();
        for cell in &week.days {
            let mut style = Style::default();
            if !cell.is_current_month {
                style = style.fg(app.theme.inactive_day);
            } else if cell.is_cursor && focused {
                style = style
                    .bg(app.theme.selected_bg)
                    .fg(app.theme.selected_fg)
                    .add_modifier(Modifier::BOLD);
            } else if cell.in_selection {
                style = style.bg(app.theme.range_selection).add_modifier(Modifier::BOLD);
            } else if cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }
            if cell.is_cursor && !focused {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            spans.push(Span::styled(format!(" {:>2}", cell.date.day()), style));
            for color in cell.event_colors.iter().take(MAX_DOTS) {
                spans.push(Span::styled("•", Style::default().fg(hex_to_color(color))));
            }
            let padding = 4 - cell.event_colors.len().min(MAX_DOTS);
            spans.push(Span::raw(" ".repeat(padding)));
        }
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(grid, chunks[0]);

    render_day_events(f, app, store, chunks[1]);
}

/// While dragging, the moved event is drawn at its previewed position.
fn events_with_drag_preview(app: &AppState, store: &EventStore) -> Vec<CalendarEvent> {
    let mut events = store.events();
    if let Some(preview) = app.calendar.dragged_event_preview(store) {
        for event in events.iter_mut().filter(|e| e.id == preview.id) {
            *event = preview.clone();
        }
    }
    events
}

fn render_day_events(f: &mut Frame, app: &AppState, store: &EventStore, area: Rect) {
    let cursor = app.calendar.cursor;
    let events = app.calendar.events_on(store, cursor);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Events on {}", cursor.format("%B %d, %Y")),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(Span::styled(
            "No events",
            Style::default().fg(app.theme.inactive_day),
        )));
    }

    for (idx, event) in events.iter().enumerate() {
        let is_selected = idx == app.calendar.selected_event_index;
        let marker = if is_selected { ">" } else { " " };
        let title_style = if is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
        } else {
            Style::default()
        };
        let range = format!(
            "{} - {}",
            event.start.format("%b %d %H:%M"),
            event.end.format("%b %d %H:%M")
        );

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.selected_bg)),
            Span::styled("■ ", Style::default().fg(hex_to_color(&event.color))),
            Span::styled(event.title.clone(), title_style),
            Span::raw("  "),
            Span::styled(range, Style::default().fg(app.theme.inactive_day)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(hint_line(app));

    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, area);
}

fn hint_line(app: &AppState) -> Line<'static> {
    let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
    match &app.calendar.phase {
        Phase::SelectingRange { .. } => {
            let days = app.calendar.selection().map(|s| s.days()).unwrap_or(1);
            Line::from(vec![
                Span::styled("SELECT ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::raw(format!("({} day{}) | ", days, if days == 1 { "" } else { "s" })),
                key("Enter", Color::Green),
                Span::raw(" = Create event | "),
                key("Esc", Color::Red),
                Span::raw(" = Cancel"),
            ])
        }
        Phase::Dragging { offset_days, .. } => Line::from(vec![
            Span::styled("MOVE ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::raw(format!("({:+} days) | ", offset_days)),
            key("Enter", Color::Green),
            Span::raw(" = Drop | "),
            key("Esc", Color::Red),
            Span::raw(" = Cancel"),
        ]),
        _ => Line::from(vec![
            key("hjkl", Color::Cyan),
            Span::raw(" = Navigate | "),
            key("a", Color::Green),
            Span::raw(" = Add | "),
            key("v", Color::Magenta),
            Span::raw(" = Select range | "),
            key("n", Color::Cyan),
            Span::raw(" = Next event | "),
            key("m", Color::Cyan),
            Span::raw(" = Move | "),
            key("x", Color::Red),
            Span::raw(" = Delete"),
        ]),
    }
}

fn hex_to_color(hex: &str) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}
