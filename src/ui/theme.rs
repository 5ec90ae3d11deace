use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub range_selection: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub accordion_header: Color,
    pub accordion_content: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            range_selection: Color::DarkGray,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            accordion_header: Color::Cyan,
            accordion_content: Color::Gray,
            status_bar: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Palette for terminals with a light background.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            title: Color::Rgb(38, 139, 210),
            selected_bg: Color::Rgb(238, 232, 213),
            selected_fg: Color::Rgb(7, 54, 66),
            today: Color::Rgb(133, 153, 0),
            range_selection: Color::Rgb(147, 161, 161),
            weekday_header: Color::Rgb(181, 137, 0),
            inactive_day: Color::Rgb(147, 161, 161),
            accordion_header: Color::Rgb(38, 139, 210),
            accordion_content: Color::Rgb(88, 110, 117),
            status_bar: Color::Rgb(88, 110, 117),
            error: Color::Rgb(220, 50, 47),
            success: Color::Rgb(133, 153, 0),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            range_selection: Color::Rgb(67, 76, 94),
            weekday_header: Color::Rgb(235, 203, 139),
            inactive_day: Color::Rgb(76, 86, 106),
            accordion_header: Color::Rgb(129, 161, 193),
            accordion_content: Color::Rgb(216, 222, 233),
            status_bar: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "light", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
