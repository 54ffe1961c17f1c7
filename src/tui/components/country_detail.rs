//! # CountryDetail Component
//!
//! One country's page: facts, live local time per timezone, and the
//! neighboring countries as a selectable list of links.
//!
//! Content is laid out as lines inside a `tui_scrollview::ScrollView` so long
//! pages (many timezones or neighbors) scroll. The line index where the
//! neighbor list starts is recorded during render for mouse hit-testing.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::record::{CountryRecord, conjunction_list};
use crate::core::state::DetailPage;
use crate::tui::component::Component;

pub struct CountryDetailState {
    pub scroll: ScrollViewState,
    pub selected_neighbor: usize,
    /// Content line of the first neighbor, set during render.
    neighbor_line_start: Option<u16>,
}

impl CountryDetailState {
    pub fn new() -> Self {
        Self {
            scroll: ScrollViewState::default(),
            selected_neighbor: 0,
            neighbor_line_start: None,
        }
    }

    pub fn select_next(&mut self, neighbor_count: usize) {
        if neighbor_count > 0 {
            self.selected_neighbor = (self.selected_neighbor + 1).min(neighbor_count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_neighbor = self.selected_neighbor.saturating_sub(1);
    }

    /// Neighbor index under a click at screen `row`, for a page drawn in `area`.
    pub fn neighbor_at(&self, row: u16, area: Rect, neighbor_count: usize) -> Option<usize> {
        let start = self.neighbor_line_start?;
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let content_row = row - area.y + self.scroll.offset().y;
        let index = content_row.checked_sub(start)? as usize;
        (index < neighbor_count).then_some(index)
    }
}

impl Default for CountryDetailState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CountryDetail<'a> {
    page: &'a DetailPage,
    state: &'a mut CountryDetailState,
}

impl<'a> CountryDetail<'a> {
    pub fn new(page: &'a DetailPage, state: &'a mut CountryDetailState) -> Self {
        Self { page, state }
    }

    fn render_message(frame: &mut Frame, area: Rect, text: String, color: Color) {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(paragraph, area);
    }
}

impl Component for CountryDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(error) = &self.page.error {
            self.state.neighbor_line_start = None;
            let text = format!(
                "Could not load {}: {}\n\nPress Esc to go back.",
                self.page.code, error
            );
            Self::render_message(frame, area, text, Color::Red);
            return;
        }

        let Some(country) = &self.page.country else {
            self.state.neighbor_line_start = None;
            Self::render_message(frame, area, format!("Loading {}...", self.page.code), Color::DarkGray);
            return;
        };

        if !self.page.neighbors.is_empty() {
            self.state.selected_neighbor = self
                .state
                .selected_neighbor
                .min(self.page.neighbors.len() - 1);
        }

        let mut lines = fact_lines(country);

        lines.push(section("Local Time"));
        if self.page.readings.is_empty() {
            lines.push(Line::from("  N/A"));
        }
        for reading in &self.page.readings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", reading.timezone), Style::default().fg(Color::Cyan)),
                Span::raw(reading.label()),
            ]));
        }
        lines.push(Line::default());

        lines.push(section("Neighboring Countries"));
        if self.page.neighbors.is_empty() {
            lines.push(Line::from("  None"));
            self.state.neighbor_line_start = None;
        } else {
            self.state.neighbor_line_start = Some(lines.len() as u16);
            for (i, neighbor) in self.page.neighbors.iter().enumerate() {
                let selected = i == self.state.selected_neighbor;
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
                };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{} {}", neighbor.flag, neighbor.name), style),
                ]));
            }
        }

        let width = area.width.saturating_sub(1); // leave room for the scrollbar
        let height = lines.len() as u16;
        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: String, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 { singular } else { plural }.to_string()
}

/// `"Official Finnish Languages"`; the demonym is omitted when unknown.
fn prefixed(prefix: &str, demonym: &str, noun: String) -> String {
    [prefix, demonym, noun.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn fact_lines(country: &CountryRecord) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        format!("{} {}", country.flag, country.name),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if country.has_distinct_native_name() {
        title.push(Span::styled(
            format!(" ({})", country.native_name),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let languages: Vec<String> = country.languages.iter().map(|l| l.name.clone()).collect();
    let currencies: Vec<String> = country.currencies.iter().map(|c| c.label()).collect();
    let or_na = |text: String| if text.is_empty() { "N/A".to_string() } else { text };

    vec![
        Line::from(title),
        Line::from(Span::styled(
            country.subregion.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        field("Population".to_string(), country.population_label()),
        field("Area (km²)".to_string(), country.area_label()),
        field("Capital".to_string(), country.capital_label()),
        field(
            prefixed(
                "Official",
                &country.demonym,
                plural(languages.len(), "Language", "Languages"),
            ),
            or_na(conjunction_list(&languages)),
        ),
        field(
            prefixed(
                "",
                &country.demonym,
                plural(currencies.len(), "Currency", "Currencies"),
            ),
            or_na(conjunction_list(&currencies)),
        ),
        field("Gini".to_string(), country.gini_label()),
        field(
            plural(country.timezones.len(), "Time Zone", "Time Zones").to_string(),
            or_na(country.timezones.join(", ")),
        ),
        Line::default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::readings_for;
    use crate::core::record::{Currency, Language};
    use crate::test_support::record;
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn finland_page() -> DetailPage {
        let mut finland = record("Finland", "Europe", 5_530_719);
        finland.native_name = "Suomi".to_string();
        finland.demonym = "Finnish".to_string();
        finland.subregion = "Northern Europe".to_string();
        finland.capital = vec!["Helsinki".to_string()];
        finland.timezones = vec!["UTC+02:00".to_string()];
        finland.languages = vec![
            Language { code: "fin".to_string(), name: "Finnish".to_string() },
            Language { code: "swe".to_string(), name: "Swedish".to_string() },
        ];
        finland.currencies = vec![Currency {
            code: "EUR".to_string(),
            name: "Euro".to_string(),
            symbol: Some("€".to_string()),
        }];

        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut page = DetailPage::loading("FIN".to_string());
        page.readings = readings_for(&finland.timezones, now);
        page.country = Some(finland);
        page.neighbors = vec![record("Norway", "Europe", 1), record("Sweden", "Europe", 1)];
        page
    }

    #[test]
    fn test_render_facts() {
        let backend = TestBackend::new(70, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let page = finland_page();
        let mut state = CountryDetailState::new();

        terminal
            .draw(|f| CountryDetail::new(&page, &mut state).render(f, f.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Finland (Suomi)"));
        assert!(text.contains("Population: 5,530,719"));
        assert!(text.contains("Official Finnish Languages: Finnish and Swedish"));
        assert!(text.contains("Finnish Currency: Euro (€)"));
        assert!(text.contains("Gini: N/A"));
        assert!(text.contains("2:00:00 PM"));
        assert!(text.contains("> "));
        assert!(text.contains("Sweden"));
    }

    #[test]
    fn test_render_loading_and_error() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = CountryDetailState::new();

        let loading = DetailPage::loading("XYZ".to_string());
        terminal
            .draw(|f| CountryDetail::new(&loading, &mut state).render(f, f.area()))
            .unwrap();
        assert!(screen_text(&terminal).contains("Loading XYZ..."));

        let mut failed = DetailPage::loading("XYZ".to_string());
        failed.error = Some("Country not found".to_string());
        terminal
            .draw(|f| CountryDetail::new(&failed, &mut state).render(f, f.area()))
            .unwrap();
        assert!(screen_text(&terminal).contains("Country not found"));
    }

    #[test]
    fn test_neighbor_hit_test_after_render() {
        let backend = TestBackend::new(70, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let page = finland_page();
        let mut state = CountryDetailState::new();
        let area = Rect::new(0, 0, 70, 30);

        assert_eq!(state.neighbor_at(20, area, 2), None);

        terminal
            .draw(|f| CountryDetail::new(&page, &mut state).render(f, f.area()))
            .unwrap();

        let start = state.neighbor_line_start.unwrap();
        assert_eq!(state.neighbor_at(start, area, 2), Some(0));
        assert_eq!(state.neighbor_at(start + 1, area, 2), Some(1));
        assert_eq!(state.neighbor_at(start + 2, area, 2), None);
        assert_eq!(state.neighbor_at(start.saturating_sub(1), area, 2), None);
    }

    #[test]
    fn test_neighbor_selection_clamps() {
        let mut state = CountryDetailState::new();
        state.select_prev();
        assert_eq!(state.selected_neighbor, 0);
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected_neighbor, 1);
    }

    #[test]
    fn test_prefixed_label_without_demonym() {
        assert_eq!(prefixed("Official", "", "Language".to_string()), "Official Language");
        assert_eq!(prefixed("", "Swiss", "Currencies".to_string()), "Swiss Currencies");
    }
}
