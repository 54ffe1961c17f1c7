//! Atlas library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod countries;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    #[default]
    #[value(name = "restcountries")]
    RestCountries,
    Snapshot,
}

impl DataSource {
    /// Name used in config files and env vars.
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::RestCountries => "restcountries",
            DataSource::Snapshot => "snapshot",
        }
    }
}
