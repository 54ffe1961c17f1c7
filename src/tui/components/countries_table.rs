//! # CountriesTable Component
//!
//! The sortable listing: flag, name, population, area and gini columns, with
//! an arrow on the active sort column.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountriesTableState` lives in `TuiState` (selection, scroll offset)
//! - `CountriesTable` is created each frame with borrowed rows and view state
//!
//! Column geometry is computed by [`column_rects`] for both rendering and
//! mouse hit-testing, so a click lands on the header the user sees.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::core::ordering::{SortKey, ViewState};
use crate::core::record::{CountryRecord, format_decimal};
use crate::tui::component::Component;

const HIGHLIGHT_SYMBOL: &str = "> ";
const COLUMN_SPACING: u16 = 1;

/// Flag, then one column per `SortKey::ALL` entry.
const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(4),
    Constraint::Fill(1),
    Constraint::Length(15),
    Constraint::Length(14),
    Constraint::Length(8),
];

/// Where a click on the table landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    Header(SortKey),
    /// Index into the rows currently displayed.
    Row(usize),
}

pub struct CountriesTableState {
    pub table_state: TableState,
}

impl CountriesTableState {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Moves the selection by `delta` rows, clamped to `[0, len)`.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
    }

    /// Back to the first row, e.g. after the filter changes.
    pub fn reset(&mut self) {
        self.table_state = TableState::default().with_selected(Some(0));
    }
}

impl Default for CountriesTableState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CountriesTable<'a> {
    rows: &'a [&'a CountryRecord],
    view: &'a ViewState,
    is_loading: bool,
    state: &'a mut CountriesTableState,
}

impl<'a> CountriesTable<'a> {
    pub fn new(
        rows: &'a [&'a CountryRecord],
        view: &'a ViewState,
        is_loading: bool,
        state: &'a mut CountriesTableState,
    ) -> Self {
        Self {
            rows,
            view,
            is_loading,
            state,
        }
    }
}

impl Component for CountriesTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));

        if self.rows.is_empty() {
            let message = if self.is_loading {
                "Loading countries..."
            } else {
                "No countries match."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Keep the selection inside the (possibly shrunk) row set
        if self.state.selected().is_none_or(|i| i >= self.rows.len()) {
            self.state.move_selection(0, self.rows.len());
        }

        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(SortKey::ALL.iter().map(|key| Cell::from(header_label(*key, self.view)))),
        )
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|country| {
            let gini = country.gini_display();
            Row::new(vec![
                Cell::from(country.flag.clone()),
                Cell::from(country.name.clone()),
                Cell::from(Line::from(country.population_label()).right_aligned()),
                Cell::from(Line::from(format_decimal(country.area_or_zero())).right_aligned()),
                Cell::from(Line::from(format!("{} %", format_decimal(gini.value))).right_aligned()),
            ])
        });

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}

/// `"Population ▼"` for the active column, the bare label otherwise.
pub fn header_label(key: SortKey, view: &ViewState) -> String {
    match view.arrow_for(key) {
        Some(arrow) => format!("{} {}", key.label(), arrow),
        None => key.label().to_string(),
    }
}

/// Screen rects of the five columns (flag first) for a table drawn in `area`.
pub fn column_rects(area: Rect) -> Vec<Rect> {
    let inner = Block::bordered().inner(area);
    let selection_width = HIGHLIGHT_SYMBOL.len() as u16;
    let [_selection, columns] =
        Layout::horizontal([Constraint::Length(selection_width), Constraint::Fill(0)]).areas(inner);
    Layout::horizontal(COLUMN_WIDTHS)
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(columns)
        .to_vec()
}

/// Maps a click at (`column`, `row`) on a table drawn in `area` to a header
/// or a displayed row. `offset` is the table's current scroll offset.
pub fn hit_test(
    column: u16,
    row: u16,
    area: Rect,
    offset: usize,
    row_count: usize,
) -> Option<TableHit> {
    let inner = Block::bordered().inner(area);
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    if row == inner.y {
        return column_rects(area)
            .iter()
            .skip(1) // flag column has no header
            .zip(SortKey::ALL)
            .find(|(rect, _)| column >= rect.x && column < rect.x + rect.width)
            .map(|(_, key)| TableHit::Header(key));
    }

    let index = offset + (row - inner.y - 1) as usize;
    (index < row_count).then_some(TableHit::Row(index))
}
