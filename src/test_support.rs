//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::core::clock::FixedClock;
use crate::core::record::CountryRecord;
use crate::countries::{CountrySource, SourceError};

/// An in-memory source for tests that don't need real API calls.
pub struct StaticSource(pub Vec<CountryRecord>);

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError> {
        Ok(self.0.clone())
    }

    async fn by_code(&self, code: &str) -> Result<CountryRecord, SourceError> {
        self.0
            .iter()
            .find(|c| c.code == code)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(code.to_string()))
    }
}

/// Builds a minimal record. The code is the first three letters, uppercased.
pub fn record(name: &str, region: &str, population: u64) -> CountryRecord {
    CountryRecord {
        code: name.chars().take(3).collect::<String>().to_uppercase(),
        name: name.to_string(),
        region: region.to_string(),
        population: Some(population),
        ..Default::default()
    }
}

/// Creates a test App with an empty StaticSource and a clock fixed at
/// 2024-01-01 00:00:00 UTC.
pub fn test_app() -> crate::core::state::App {
    let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    crate::core::state::App::new(
        Arc::new(StaticSource(Vec::new())),
        Arc::new(FixedClock(instant)),
    )
}
