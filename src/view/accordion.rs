#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    Message,
    ClipboardList,
    Calendar,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::Message => "✉",
            Icon::ClipboardList => "☰",
            Icon::Calendar => "▦",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccordionItem<T> {
    pub title: String,
    pub icon: Icon,
    pub content: Vec<T>,
    pub expanded: bool,
}

impl<T> AccordionItem<T> {
    pub fn new(title: impl Into<String>, icon: Icon, content: Vec<T>) -> Self {
        Self {
            title: title.into(),
            icon,
            content,
            expanded: false,
        }
    }
}

/// A visible line of the accordion: a section header or one of the content
/// blocks of an expanded section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionRow {
    Header(usize),
    Content(usize, usize),
}

/// Collapsible sections. Only expansion state and the row cursor live here;
/// what the content means is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Accordion<T> {
    pub items: Vec<AccordionItem<T>>,
    pub light: bool,
    cursor: usize,
}

impl<T> Accordion<T> {
    pub fn new(items: Vec<AccordionItem<T>>) -> Self {
        Self {
            items,
            light: false,
            cursor: 0,
        }
    }

    pub fn light(mut self) -> Self {
        self.light = true;
        self
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.expanded = !item.expanded;
        }
        self.clamp_cursor();
    }

    pub fn expand(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.expanded = true;
        }
    }

    pub fn collapse(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.expanded = false;
        }
        self.clamp_cursor();
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.expanded)
    }

    pub fn rows(&self) -> Vec<AccordionRow> {
        let mut rows = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            rows.push(AccordionRow::Header(index));
            if item.expanded {
                rows.extend((0..item.content.len()).map(|child| AccordionRow::Content(index, child)));
            }
        }
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_row(&self) -> Option<AccordionRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn content_at(&self, row: AccordionRow) -> Option<&T> {
        match row {
            AccordionRow::Content(item, child) => self.items.get(item)?.content.get(child),
            AccordionRow::Header(_) => None,
        }
    }

    pub fn move_down(&mut self) {
        let count = self.rows().len();
        if count > 0 && self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Collapsing a section can remove the row under the cursor; fall back to
    /// that section's header.
    fn clamp_cursor(&mut self) {
        let rows = self.rows();
        if self.cursor < rows.len() {
            return;
        }
        self.cursor = rows.len().saturating_sub(1);
    }
}

/// Content blocks of the main navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEntry {
    AddButton(String),
    Text(String),
    Calendar(String),
}

pub fn pages_accordion(calendars: &[String]) -> Accordion<PageEntry> {
    let calendar_entries = if calendars.is_empty() {
        vec![PageEntry::Text("No calendars configured".to_string())]
    } else {
        calendars
            .iter()
            .map(|id| PageEntry::Calendar(id.clone()))
            .collect()
    };

    Accordion::new(vec![
        AccordionItem::new(
            "My projects",
            Icon::Home,
            vec![PageEntry::AddButton("Add new project".to_string())],
        ),
        AccordionItem::new(
            "Chats",
            Icon::Message,
            vec![PageEntry::Text("Chats content".to_string())],
        ),
        AccordionItem::new(
            "Tasks",
            Icon::ClipboardList,
            vec![PageEntry::AddButton("Add new task".to_string())],
        ),
        AccordionItem::new("Calendar", Icon::Calendar, calendar_entries),
    ])
    .light()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Accordion<PageEntry> {
        pages_accordion(&["1".to_string(), "work".to_string()])
    }

    #[test]
    fn pages_accordion_has_four_collapsed_sections() {
        let accordion = pages();

        let titles: Vec<_> = accordion.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["My projects", "Chats", "Tasks", "Calendar"]);
        assert!(accordion.items.iter().all(|i| !i.expanded));
        assert!(accordion.light);
    }

    #[test]
    fn collapsed_accordion_shows_only_headers() {
        let accordion = pages();

        assert_eq!(accordion.rows().len(), 4);
    }

    #[test]
    fn toggle_reveals_section_content() {
        let mut accordion = pages();

        accordion.toggle(3);

        assert!(accordion.is_expanded(3));
        assert_eq!(
            accordion.rows()[4..],
            [AccordionRow::Content(3, 0), AccordionRow::Content(3, 1)]
        );
        assert_eq!(
            accordion.content_at(AccordionRow::Content(3, 1)),
            Some(&PageEntry::Calendar("work".to_string()))
        );
    }

    #[test]
    fn collapsing_clamps_cursor_to_remaining_rows() {
        let mut accordion = pages();
        accordion.expand(3);
        for _ in 0..10 {
            accordion.move_down();
        }
        assert_eq!(accordion.current_row(), Some(AccordionRow::Content(3, 1)));

        accordion.collapse(3);

        assert_eq!(accordion.current_row(), Some(AccordionRow::Header(3)));
    }

    #[test]
    fn cursor_stops_at_top() {
        let mut accordion = pages();

        accordion.move_up();

        assert_eq!(accordion.cursor(), 0);
    }

    #[test]
    fn calendar_section_without_calendars_shows_hint() {
        let accordion = pages_accordion(&[]);

        assert_eq!(
            accordion.items[3].content,
            vec![PageEntry::Text("No calendars configured".to_string())]
        );
    }
}
