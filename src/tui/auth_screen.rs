use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use lifesync::{
    app::{AppState, Screen},
    view::{AuthField, AuthMode},
};

use crate::tui::{dialogs::centered_rect, presentation::render_status};

pub fn render(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.size());

    let area = centered_rect(56, 12, chunks[0]);
    f.render_widget(Clear, area);

    let (title, lines) = match app.screen {
        Screen::Verify => (" Verify ", verify_lines(app)),
        _ => match app.auth_form.mode {
            AuthMode::Login => (" Sign in ", form_lines(app)),
            AuthMode::Register => (" Create account ", form_lines(app)),
        },
    };

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Left);
    f.render_widget(form, area);

    render_status(f, app, chunks[1]);
}

fn form_lines(app: &AppState) -> Vec<Line<'static>> {
    let form = &app.auth_form;
    let label = |field: AuthField, text: &'static str| {
        let color = if form.active_field == field {
            app.theme.selected_bg
        } else {
            Color::DarkGray
        };
        Span::styled(text, Style::default().fg(color))
    };
    let switch_hint = match form.mode {
        AuthMode::Login => " = Create an account",
        AuthMode::Register => " = Sign in instead",
    };

    vec![
        Line::from(""),
        Line::from(vec![label(AuthField::Email, "Email:    "), Span::raw(form.email.clone())]),
        Line::from(""),
        Line::from(vec![
            label(AuthField::Password, "Password: "),
            Span::raw(form.masked_password()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Submit | "),
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" = Next field"),
        ]),
        Line::from(vec![
            Span::styled("F2", Style::default().fg(Color::Cyan)),
            Span::raw(switch_hint),
            Span::raw(" | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Quit"),
        ]),
    ]
}

fn verify_lines(app: &AppState) -> Vec<Line<'static>> {
    let code = &app.code_form;
    let mut cells = vec![Span::raw("   ")];
    for (idx, cell) in code.cells().iter().enumerate() {
        let style = if idx == code.cursor {
            Style::default()
                .bg(app.theme.selected_bg)
                .fg(app.theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        cells.push(Span::styled(format!("[ {} ]", cell.unwrap_or(' ')), style));
        cells.push(Span::raw(" "));
    }

    vec![
        Line::from(""),
        Line::from("Enter the code sent to your email."),
        Line::from(""),
        Line::from(cells),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Verify | "),
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::raw(" = Resend | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Back"),
        ]),
    ]
}
