use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use lifesync::{
    app::AppState,
    view::{AccordionRow, PageEntry},
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let accordion = &app.accordion;
    let open_calendar = app.calendar.calendar_id();

    let lines: Vec<Line> = accordion
        .rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let text = match row {
                AccordionRow::Header(item) => {
                    let item = &accordion.items[item];
                    let arrow = if item.expanded { "▾" } else { "▸" };
                    format!("{} {} {}", arrow, item.icon.glyph(), item.title)
                }
                AccordionRow::Content(..) => match accordion.content_at(row) {
                    Some(PageEntry::AddButton(label)) => format!("    + {}", label),
                    Some(PageEntry::Text(text)) => format!("    {}", text),
                    Some(PageEntry::Calendar(id)) if Some(id.as_str()) == open_calendar => {
                        format!("    • {}", id)
                    }
                    Some(PageEntry::Calendar(id)) => format!("      {}", id),
                    None => String::new(),
                },
            };

            let mut style = match row {
                AccordionRow::Header(_) => Style::default()
                    .fg(app.theme.accordion_header)
                    .add_modifier(Modifier::BOLD),
                AccordionRow::Content(..) => Style::default().fg(app.theme.accordion_content),
            };
            if focused && idx == accordion.cursor() {
                style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    // The light variant drops the frame and keeps only the title.
    let block = if accordion.light {
        Block::default().title(" Pages ")
    } else {
        Block::default().title(" Pages ").borders(Borders::ALL)
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
