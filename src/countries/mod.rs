//! # Country Data Boundary
//!
//! Everything that talks to the outside world for country data. Sources hand
//! back domain `CountryRecord`s; the wire shapes stay in `types`.

pub mod source;
pub mod sources;
pub mod types;

pub use source::{CountrySource, SourceError};
pub use sources::{RestCountriesSource, SnapshotSource};
