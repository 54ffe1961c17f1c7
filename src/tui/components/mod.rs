//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (stateless status line)
//! ├── search_input.rs     (filter box, emits SearchEvent)
//! ├── countries_table.rs  (sortable listing + header hit-testing)
//! └── country_detail.rs   (one country's page, scrollable)
//! ```
//!
//! Stateless components take everything as props. Stateful ones keep their
//! persistent state in `TuiState` and are wrapped per frame by a transient
//! struct borrowing that state.

mod title_bar;
pub use title_bar::TitleBar;

pub mod countries_table;
pub mod country_detail;
pub mod search_input;
pub use countries_table::{CountriesTable, CountriesTableState, TableHit};
pub use country_detail::{CountryDetail, CountryDetailState};
pub use search_input::{SearchEvent, SearchInput};
