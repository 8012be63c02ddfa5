pub mod mock;

use crate::CompanyMatch;

use serde::Deserialize;
use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("Parsing: {0}")]
    ParseError(String),
}

/// Where company lookups are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Directory {
    /// Fixed in-memory listing, resolved after an artificial delay
    #[default]
    Mock,
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Directory::Mock => "Mock directory",
            }
        )
    }
}

impl Directory {
    pub async fn fetch_companies(
        self,
        query: String,
        latency: Duration,
    ) -> Result<Vec<CompanyMatch>, AdapterError> {
        match self {
            Directory::Mock => mock::fetch_companies(&query, latency).await,
        }
    }
}
