//! Offline source reading a JSON array in the restcountries v3.1 shape from
//! disk. The file is read on every call; nothing is kept in memory.

use std::path::PathBuf;

use async_trait::async_trait;
use log::info;

use crate::core::record::CountryRecord;
use crate::countries::types::WireCountry;
use crate::countries::{CountrySource, SourceError};

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Config(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let countries: Vec<WireCountry> =
            serde_json::from_str(&contents).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }
}

#[async_trait]
impl CountrySource for SnapshotSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let countries = self.read().await?;
        info!(
            "Loaded {} countries from {}",
            countries.len(),
            self.path.display()
        );
        Ok(countries)
    }

    async fn by_code(&self, code: &str) -> Result<CountryRecord, SourceError> {
        self.read()
            .await?
            .into_iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| SourceError::NotFound(code.to_string()))
    }
}
