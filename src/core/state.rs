//! # Application State
//!
//! Core state for Atlas. Domain and page state only; widget state (selection,
//! scroll offsets, the search buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn CountrySource>  // data boundary
//! ├── clock: Arc<dyn Clock>           // instant source for local-time readings
//! ├── countries: Vec<CountryRecord>   // listing data, in source order
//! ├── view: ViewState                 // sort key, direction, filter keyword
//! ├── page: Page                      // listing or one country's detail
//! ├── status_message: String          // status bar text
//! ├── is_loading: bool                // waiting for the listing fetch
//! └── error: Option<String>           // listing fetch failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::clock::{Clock, ClockReading};
use crate::core::ordering::ViewState;
use crate::core::record::CountryRecord;
use crate::countries::CountrySource;

/// State of an open detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    /// Code requested; responses for any other code are stale.
    pub code: String,
    /// None while loading.
    pub country: Option<CountryRecord>,
    pub neighbors: Vec<CountryRecord>,
    /// One reading per timezone, refreshed on each clock tick.
    pub readings: Vec<ClockReading>,
    pub error: Option<String>,
}

impl DetailPage {
    pub fn loading(code: String) -> Self {
        Self {
            code,
            country: None,
            neighbors: Vec::new(),
            readings: Vec::new(),
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.country.is_none() && self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Listing,
    Detail(DetailPage),
}

pub struct App {
    pub source: Arc<dyn CountrySource>,
    pub clock: Arc<dyn Clock>,
    pub countries: Vec<CountryRecord>,
    pub view: ViewState,
    pub page: Page,
    pub status_message: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl App {
    pub fn new(source: Arc<dyn CountrySource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            countries: Vec::new(),
            view: ViewState::default(),
            page: Page::Listing,
            status_message: String::from("Loading countries..."),
            is_loading: true,
            error: None,
        }
    }

    /// Filtered and ordered listing rows for the current view.
    pub fn visible_countries(&self) -> Vec<&CountryRecord> {
        self.view.apply(&self.countries)
    }

    pub fn detail(&self) -> Option<&DetailPage> {
        match &self.page {
            Page::Detail(detail) => Some(detail),
            Page::Listing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.is_loading);
        assert!(app.countries.is_empty());
        assert!(app.detail().is_none());
        assert_eq!(app.status_message, "Loading countries...");
    }

    #[test]
    fn test_detail_page_loading() {
        let page = super::DetailPage::loading("FIN".to_string());
        assert!(page.is_loading());
    }
}
