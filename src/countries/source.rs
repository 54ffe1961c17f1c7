use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use log::warn;

use crate::core::record::CountryRecord;

/// Errors that can occur while fetching country data.
#[derive(Debug)]
pub enum SourceError {
    /// Source misconfigured (bad URL, missing snapshot path).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
    /// No country exists for the requested code.
    NotFound(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
            SourceError::NotFound(code) => write!(f, "no country with code {code}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Every country, in the order the source lists them.
    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError>;

    /// One country by alpha-3 code.
    async fn by_code(&self, code: &str) -> Result<CountryRecord, SourceError>;

    /// Looks up each border code concurrently. Codes that fail to resolve are
    /// logged and skipped; the rest keep the order of `codes`.
    async fn neighbors(&self, codes: &[String]) -> Vec<CountryRecord> {
        let lookups = codes.iter().map(|code| self.by_code(code));
        join_all(lookups)
            .await
            .into_iter()
            .zip(codes)
            .filter_map(|(result, code)| match result {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping neighbor {}: {}", code, e);
                    None
                }
            })
            .collect()
    }
}
