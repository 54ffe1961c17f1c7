pub mod restcountries;
pub mod snapshot;

pub use restcountries::RestCountriesSource;
pub use snapshot::SnapshotSource;
