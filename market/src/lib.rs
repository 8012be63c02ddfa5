pub mod adapter;
pub mod search;

pub use adapter::{AdapterError, Directory};
pub use search::{QueryTracker, Ticket};

use serde::{Deserialize, Serialize};

/// A single row of a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyMatch {
    pub symbol: String,
    pub name: String,
}

impl CompanyMatch {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match against either the symbol or the name.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.symbol.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

impl std::fmt::Display for CompanyMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}
