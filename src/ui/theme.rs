use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt: Style,
    pub hint: Style,
    pub item: Style,
    pub highlighted: Style,
    pub cursor: Style,
    pub mark: Style,
    pub footer: Style,
    pub status: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            prompt: Style::new().bold(),
            hint: Style::new().color(Color::DarkGrey),
            item: Style::new(),
            highlighted: Style::new().color(Color::Cyan).bold(),
            cursor: Style::new().color(Color::Yellow),
            mark: Style::new().color(Color::Yellow).underline(),
            footer: Style::new().color(Color::DarkGrey),
            status: Style::new().color(Color::DarkGrey),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
