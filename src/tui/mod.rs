//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Fetches and the local-time clock run as tokio tasks that report back over
//! a std `mpsc` channel of `Action`s. Each kind of task has one slot holding
//! its `AbortHandle`; starting a new one aborts the previous, so at most one
//! clock ever ticks.
//!
//! ## Redraw Strategy
//!
//! Frames are drawn only when an input event or a background action arrived.
//! The poll timeout is short enough that clock ticks show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

use crate::core::action::{Action, Effect, update};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Page};
use crate::countries::{CountrySource, RestCountriesSource, SnapshotSource, SourceError};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountriesTableState, CountryDetailState, SearchEvent, SearchInput, TableHit,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);
const PAGE_STEP: isize = 10;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search: SearchInput,
    pub table: CountriesTableState,
    pub detail: CountryDetailState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search: SearchInput::new(),
            table: CountriesTableState::new(),
            detail: CountryDetailState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock cadence from config.
#[derive(Debug, Clone, Copy)]
struct ClockSettings {
    interval: Duration,
    max_ticks: Option<u32>,
}

/// Abort handles for running background work, one slot per kind.
#[derive(Default)]
struct Tasks {
    listing: Option<AbortHandle>,
    detail: Option<AbortHandle>,
    clock: Option<AbortHandle>,
}

impl Tasks {
    fn replace(slot: &mut Option<AbortHandle>, handle: AbortHandle) {
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn stop_clock(&mut self) {
        if let Some(handle) = self.clock.take() {
            handle.abort();
            debug!("Clock stopped");
        }
    }

    fn abort_all(&mut self) {
        for handle in [self.listing.take(), self.detail.take(), self.clock.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build a country source from the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn CountrySource>, SourceError> {
    match config.source.as_str() {
        "snapshot" => {
            let path = config.snapshot_path.clone().ok_or_else(|| {
                SourceError::Config(
                    "snapshot source needs a file (--snapshot or ATLAS_SNAPSHOT_PATH)".to_string(),
                )
            })?;
            Ok(Arc::new(SnapshotSource::new(path)))
        }
        "restcountries" => Ok(Arc::new(RestCountriesSource::new(
            config.restcountries_base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?)),
        other => Err(SourceError::Config(format!("unknown source '{other}'"))),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config).map_err(std::io::Error::other)?;
    let mut app = App::new(source, Arc::new(SystemClock));
    let mut tui = TuiState::new();
    let clock_settings = ClockSettings {
        interval: Duration::from_millis(config.clock_interval_ms),
        max_ticks: config.clock_max_ticks,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks::default();
    tasks.listing = Some(spawn_fetch_countries(app.source.clone(), tx.clone()));

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_some() {
            needs_redraw = true;
        }
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event, frame_area) else {
                continue;
            };
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tasks, &tx, clock_settings) {
                break 'main;
            }
        }

        // Handle background task actions (fetch results, clock ticks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {}", action_name(&action));
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tasks, &tx, clock_settings) {
                break 'main;
            }
        }
    }

    tasks.abort_all();
    ratatui::restore();
    info!("Atlas shut down");
    Ok(())
}

/// Short label for logging without dumping whole record lists.
fn action_name(action: &Action) -> String {
    match action {
        Action::CountriesLoaded(countries) => format!("CountriesLoaded({})", countries.len()),
        Action::DetailLoaded { country, neighbors } => {
            format!("DetailLoaded({}, {} neighbors)", country.code, neighbors.len())
        }
        other => format!("{other:?}"),
    }
}

/// Starts whatever I/O an effect asks for. Returns true when the app should quit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tasks: &mut Tasks,
    tx: &mpsc::Sender<Action>,
    clock: ClockSettings,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::FetchCountries => {
            Tasks::replace(
                &mut tasks.listing,
                spawn_fetch_countries(app.source.clone(), tx.clone()),
            );
        }
        Effect::FetchDetail(code) => {
            tasks.stop_clock();
            Tasks::replace(
                &mut tasks.detail,
                spawn_fetch_detail(app.source.clone(), code, tx.clone()),
            );
        }
        Effect::StartClock => {
            tasks.stop_clock();
            tasks.clock = Some(spawn_clock(
                app.clock.clone(),
                clock.interval,
                clock.max_ticks,
                tx.clone(),
            ));
        }
        Effect::StopClock => tasks.stop_clock(),
    }
    false
}

/// Turns a terminal event into at most one core action, updating widget
/// state along the way.
fn route_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match &app.page {
        Page::Listing => route_listing_event(app, tui, event, frame_area),
        Page::Detail(detail) => {
            let neighbors = &detail.neighbors;
            match event {
                TuiEvent::Escape | TuiEvent::Backspace => Some(Action::Back),
                TuiEvent::Reload => Some(open_country(tui, detail.code.clone())),
                TuiEvent::CursorUp => {
                    tui.detail.select_prev();
                    None
                }
                TuiEvent::CursorDown => {
                    tui.detail.select_next(neighbors.len());
                    None
                }
                TuiEvent::Submit => neighbors
                    .get(tui.detail.selected_neighbor)
                    .map(|neighbor| open_country(tui, neighbor.code.clone())),
                TuiEvent::ScrollUp => {
                    tui.detail.scroll.scroll_up();
                    None
                }
                TuiEvent::ScrollDown => {
                    tui.detail.scroll.scroll_down();
                    None
                }
                TuiEvent::PageUp => {
                    tui.detail.scroll.scroll_page_up();
                    None
                }
                TuiEvent::PageDown => {
                    tui.detail.scroll.scroll_page_down();
                    None
                }
                TuiEvent::MouseClick(_column, row) => {
                    let area = ui::detail_area(frame_area);
                    let index = tui.detail.neighbor_at(*row, area, neighbors.len())?;
                    Some(open_country(tui, neighbors[index].code.clone()))
                }
                _ => None,
            }
        }
    }
}

fn route_listing_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Option<Action> {
    match event {
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::Reload => Some(Action::Reload),
        TuiEvent::SortBy(key) => Some(Action::SortBy(*key)),
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
            let SearchEvent::Changed(keyword) = tui.search.handle_event(event)?;
            tui.table.reset();
            Some(Action::FilterChanged(keyword))
        }
        TuiEvent::CursorUp | TuiEvent::ScrollUp => {
            tui.table.move_selection(-1, app.visible_countries().len());
            None
        }
        TuiEvent::CursorDown | TuiEvent::ScrollDown => {
            tui.table.move_selection(1, app.visible_countries().len());
            None
        }
        TuiEvent::PageUp => {
            tui.table.move_selection(-PAGE_STEP, app.visible_countries().len());
            None
        }
        TuiEvent::PageDown => {
            tui.table.move_selection(PAGE_STEP, app.visible_countries().len());
            None
        }
        // The error panel replaces the table; nothing there can be opened
        TuiEvent::Submit | TuiEvent::MouseClick(..) if app.error.is_some() => None,
        TuiEvent::Submit => {
            let rows = app.visible_countries();
            let code = rows.get(tui.table.selected()?)?.code.clone();
            Some(open_country(tui, code))
        }
        TuiEvent::MouseClick(column, row) => {
            let rows = app.visible_countries();
            let offset = tui.table.table_state.offset();
            match ui::hit_test_listing(*column, *row, frame_area, offset, rows.len())? {
                TableHit::Header(key) => Some(Action::SortBy(key)),
                TableHit::Row(index) => {
                    tui.table.table_state.select(Some(index));
                    let code = rows[index].code.clone();
                    Some(open_country(tui, code))
                }
            }
        }
        _ => None,
    }
}

/// Fresh detail widget state for a newly opened country.
fn open_country(tui: &mut TuiState, code: String) -> Action {
    tui.detail = CountryDetailState::new();
    Action::OpenCountry(code)
}

fn spawn_fetch_countries(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!("Fetching countries from {}", source.name());
    tokio::spawn(async move {
        let action = match source.all().await {
            Ok(countries) => Action::CountriesLoaded(countries),
            Err(e) => {
                warn!("Listing fetch failed: {}", e);
                Action::CountriesFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send listing result: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_fetch_detail(
    source: Arc<dyn CountrySource>,
    code: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Fetching detail for {}", code);
    tokio::spawn(async move {
        let action = match source.by_code(&code).await {
            Ok(country) => {
                let neighbors = source.neighbors(&country.border_codes).await;
                debug!(
                    "{}: {} of {} neighbors resolved",
                    code,
                    neighbors.len(),
                    country.border_codes.len()
                );
                Action::DetailLoaded { country, neighbors }
            }
            Err(e) => Action::DetailFailed {
                code: code.clone(),
                message: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send detail for {}: receiver dropped", code);
        }
    })
    .abort_handle()
}

/// Sends `Action::ClockTick` every `interval` until aborted, or until
/// `max_ticks` ticks have been sent.
fn spawn_clock(
    clock: Arc<dyn Clock>,
    interval: Duration,
    max_ticks: Option<u32>,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    debug!("Clock started ({:?}, max ticks {:?})", interval, max_ticks);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; readings were just computed
        ticker.tick().await;

        let mut sent = 0u32;
        loop {
            ticker.tick().await;
            if tx.send(Action::ClockTick(clock.now())).is_err() {
                debug!("Clock receiver dropped");
                return;
            }
            sent += 1;
            if max_ticks.is_some_and(|max| sent >= max) {
                debug!("Clock finished after {} ticks", sent);
                return;
            }
        }
    })
    .abort_handle()
}
