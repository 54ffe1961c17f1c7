//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User clicks a column header? That's `Action::SortBy(key)`.
//! The listing fetch returns? That's `Action::CountriesLoaded(records)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the adapter must start.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::core::clock::readings_for;
use crate::core::ordering::SortKey;
use crate::core::record::{CountryRecord, format_thousands};
use crate::core::state::{App, DetailPage, Page};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    /// Re-fetch the listing.
    Reload,
    CountriesLoaded(Vec<CountryRecord>),
    CountriesFailed(String),
    /// New search text (any case).
    FilterChanged(String),
    /// A column header was clicked.
    SortBy(SortKey),
    /// Navigate to a country's detail page by alpha-3 code.
    OpenCountry(String),
    DetailLoaded {
        country: CountryRecord,
        neighbors: Vec<CountryRecord>,
    },
    DetailFailed {
        code: String,
        message: String,
    },
    ClockTick(DateTime<Utc>),
    /// Leave the detail page.
    Back,
}

/// Side effects the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchCountries,
    /// Stop any running clock, then fetch this country and its neighbors.
    FetchDetail(String),
    /// (Re)start the local-time clock; any previous clock must be stopped.
    StartClock,
    StopClock,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Reload => {
            app.is_loading = true;
            app.error = None;
            app.status_message = String::from("Loading countries...");
            Effect::FetchCountries
        }
        Action::CountriesLoaded(countries) => {
            info!("Listing loaded with {} countries", countries.len());
            app.is_loading = false;
            app.error = None;
            app.status_message = format!("Found {} countries", format_thousands(countries.len() as u64));
            app.countries = countries;
            Effect::None
        }
        Action::CountriesFailed(message) => {
            warn!("Listing failed: {}", message);
            app.is_loading = false;
            app.error = Some(message);
            app.status_message = String::from("Could not load countries (Ctrl+R to retry)");
            Effect::None
        }
        Action::FilterChanged(keyword) => {
            app.view.set_keyword(&keyword);
            Effect::None
        }
        Action::SortBy(key) => {
            app.view.click_header(key);
            debug!("Sort: {:?} {:?}", app.view.key, app.view.direction);
            Effect::None
        }
        Action::OpenCountry(code) => {
            info!("Opening country {}", code);
            app.page = Page::Detail(DetailPage::loading(code.clone()));
            Effect::FetchDetail(code)
        }
        Action::DetailLoaded { country, neighbors } => {
            let now = app.clock.now();
            match &mut app.page {
                Page::Detail(detail) if detail.code.eq_ignore_ascii_case(&country.code) => {
                    detail.readings = readings_for(&country.timezones, now);
                    detail.neighbors = neighbors;
                    detail.error = None;
                    app.status_message = country.name.clone();
                    detail.country = Some(country);
                    Effect::StartClock
                }
                _ => {
                    debug!("Dropping stale detail response for {}", country.code);
                    Effect::None
                }
            }
        }
        Action::DetailFailed { code, message } => match &mut app.page {
            Page::Detail(detail) if detail.code.eq_ignore_ascii_case(&code) => {
                warn!("Detail for {} failed: {}", code, message);
                detail.error = Some(message);
                Effect::StopClock
            }
            _ => Effect::None,
        },
        Action::ClockTick(now) => {
            if let Page::Detail(detail) = &mut app.page
                && let Some(country) = &detail.country
            {
                detail.readings = readings_for(&country.timezones, now);
            }
            Effect::None
        }
        Action::Back => {
            if matches!(app.page, Page::Listing) {
                return Effect::None;
            }
            app.page = Page::Listing;
            app.status_message = format!("Found {} countries", format_thousands(app.countries.len() as u64));
            Effect::StopClock
        }
    }
}
