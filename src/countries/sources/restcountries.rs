//! restcountries.com source (v3.1 API).
//!
//! Endpoints used:
//! - `GET /all?fields=...` for the listing (the API requires a field list)
//! - `GET /alpha/{code}` for a single country

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::core::record::CountryRecord;
use crate::countries::types::{OneOrMany, WireCountry};
use crate::countries::{CountrySource, SourceError};

/// Fields the listing needs. The API caps this list at ten entries.
pub const LISTING_FIELDS: &str = "name,cca3,region,subregion,population,area,gini,flags,flag";

pub struct RestCountriesSource {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// GETs `url` and decodes the JSON body, mapping failures onto `SourceError`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("restcountries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("restcountries API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let url = format!("{}/all?fields={}", self.base_url, LISTING_FIELDS);
        let countries: Vec<WireCountry> = self.get_json(&url).await?;

        if countries.is_empty() {
            warn!("restcountries returned an empty listing");
        }
        info!("Fetched {} countries", countries.len());

        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }

    async fn by_code(&self, code: &str) -> Result<CountryRecord, SourceError> {
        let url = format!("{}/alpha/{}", self.base_url, code);
        let found: OneOrMany = match self.get_json(&url).await {
            Ok(found) => found,
            Err(SourceError::Api { status: 404, .. }) => {
                return Err(SourceError::NotFound(code.to_string()));
            }
            Err(e) => return Err(e),
        };

        let country = found
            .into_first()
            .ok_or_else(|| SourceError::NotFound(code.to_string()))?;
        debug!("Fetched country {}", country.cca3);

        Ok(country.into())
    }
}
