use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::core::ordering::SortKey;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Escape,
    Submit,
    Reload, // Ctrl+R re-fetches the listing

    InputChar(char),
    Paste(String),
    Backspace,
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    /// Keyboard equivalent of clicking a column header
    SortBy(SortKey),
    MouseClick(u16, u16),
    ScrollUp,
    ScrollDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !matches!(event::poll(timeout), Ok(true)) {
        return None;
    }
    translate(event::read().ok()?)
}

/// Maps a raw crossterm event onto a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::Reload),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::SortBy(SortKey::Name)),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                    Some(TuiEvent::SortBy(SortKey::Population))
                }
                (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::SortBy(SortKey::Area)),
                (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::SortBy(SortKey::Gini)),
                (KeyModifiers::CONTROL, _) => None,
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
