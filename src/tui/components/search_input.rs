//! # SearchInput Component
//!
//! Single-line filter box above the listing. Every edit emits the new keyword,
//! lowercased, so the parent can push it into the view state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Filter by Name, Region or SubRegion";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The keyword changed; carries the lowercased text.
    Changed(String),
}

pub struct SearchInput {
    /// Text as typed
    pub buffer: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn keyword(&self) -> String {
        self.buffer.to_lowercase()
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Search");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.buffer.as_str()).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(paragraph.block(block), area);

        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + self.buffer.width() as u16).min(max_x);
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for SearchInput {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                self.buffer
                    .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
            }
            _ => return None,
        }
        Some(SearchEvent::Changed(self.keyword()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_emits_lowercase_keyword() {
        let mut input = SearchInput::new();
        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('A')),
            Some(SearchEvent::Changed("a".to_string()))
        );
        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('s')),
            Some(SearchEvent::Changed("as".to_string()))
        );
        assert_eq!(input.buffer, "As");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = SearchInput::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::Changed(String::new()))
        );
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = SearchInput::new();
        input.handle_event(&TuiEvent::Paste("south\namerica".to_string()));
        assert_eq!(input.buffer, "south america");
    }

    #[test]
    fn test_other_events_ignored() {
        let mut input = SearchInput::new();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = SearchInput::new();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Filter by Name"));
    }
}
