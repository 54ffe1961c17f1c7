use crate::core::state::{App, Page};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::countries_table;
use crate::tui::components::{CountriesTable, CountryDetail, TableHit, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

const LISTING_HELP: &str =
    "Enter open · ↑↓ select · ^N ^P ^A ^G sort · ^R reload · Esc quit";
const DETAIL_HELP: &str = "Enter open neighbor · ↑↓ select · scroll · ^R reload · Esc back";

/// Title line, page body, help line.
fn frame_areas(frame_area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame_area)
}

/// Search box and table inside the listing body.
fn listing_areas(main_area: Rect) -> [Rect; 2] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(3), Min(0)]).areas(main_area)
}

/// Where the detail page is drawn for a given terminal size.
pub fn detail_area(frame_area: Rect) -> Rect {
    frame_areas(frame_area)[1]
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, main_area, help_area] = frame_areas(frame.area());

    TitleBar::new(app.source.name().to_string(), app.status_message.clone())
        .render(frame, title_area);

    let help = match &app.page {
        Page::Listing => {
            draw_listing(frame, main_area, app, tui);
            LISTING_HELP
        }
        Page::Detail(detail) => {
            CountryDetail::new(detail, &mut tui.detail).render(frame, main_area);
            DETAIL_HELP
        }
    };

    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}

fn draw_listing(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let [search_area, table_area] = listing_areas(area);

    tui.search.render(frame, search_area);

    if let Some(error_msg) = &app.error {
        draw_error_view(frame, table_area, error_msg);
        return;
    }

    let rows = app.visible_countries();
    CountriesTable::new(&rows, &app.view, app.is_loading, &mut tui.table)
        .render(frame, table_area);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(format!("{error_msg}\n\nPress Ctrl+R to retry."))
        .style(Style::default().fg(Color::Red))
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

/// Hit test for the listing page: a click on a column header or a row.
pub fn hit_test_listing(
    column: u16,
    row: u16,
    frame_area: Rect,
    table_offset: usize,
    row_count: usize,
) -> Option<TableHit> {
    let [_title, main_area, _help] = frame_areas(frame_area);
    let [_search, table_area] = listing_areas(main_area);
    countries_table::hit_test(column, row, table_area, table_offset, row_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::ordering::SortKey;
    use crate::test_support::{record, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_listing() {
        let backend = TestBackend::new(90, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        update(
            &mut app,
            Action::CountriesLoaded(vec![
                record("Chad", "Africa", 17_723_315),
                record("Aruba", "Americas", 106_766),
            ]),
        );
        let mut tui = TuiState::new();

        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Found 2 countries"));
        assert!(text.contains("Filter by Name"));
        assert!(text.contains("Aruba"));
        assert!(text.contains("Esc quit"));
    }

    #[test]
    fn test_draw_listing_error() {
        let backend = TestBackend::new(90, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        update(&mut app, Action::CountriesFailed("Network error: timed out".to_string()));
        let mut tui = TuiState::new();

        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("ERROR"));
        assert!(text.contains("Network error: timed out"));
    }

    #[test]
    fn test_draw_detail_loading() {
        let backend = TestBackend::new(90, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        update(&mut app, Action::OpenCountry("CHA".to_string()));
        let mut tui = TuiState::new();

        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Loading CHA..."));
        assert!(text.contains("Esc back"));
    }

    #[test]
    fn test_hit_test_listing_header_below_search_box() {
        let frame_area = Rect::new(0, 0, 90, 20);
        let [_title, main_area, _help] = frame_areas(frame_area);
        let [_search, table_area] = listing_areas(main_area);
        let header_row = table_area.y + 1;
        let name_column = countries_table::column_rects(table_area)[1];

        assert_eq!(
            hit_test_listing(name_column.x, header_row, frame_area, 0, 5),
            Some(TableHit::Header(SortKey::Name))
        );
        // The search box is not part of the table
        assert_eq!(hit_test_listing(name_column.x, 2, frame_area, 0, 5), None);
    }
}
