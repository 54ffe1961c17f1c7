//! # TitleBar Component
//!
//! Top status line: application name, data source, and the status message
//! from core state ("Found 250 countries", "Loading countries...", the open
//! country's name).
//!
//! Purely presentational. All fields are props, so it is trivial to test:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("restcountries".to_string(), app.status_message.clone());
//! title_bar.render(frame, area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Name of the active `CountrySource`
    pub source_name: String,
    /// Status message; omitted when empty
    pub status_message: String,
}

impl TitleBar {
    pub fn new(source_name: String, status_message: String) -> Self {
        Self {
            source_name,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Atlas", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" ({})", self.source_name),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
