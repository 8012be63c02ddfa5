pub mod dashboard;
pub mod sidebar;

/// Failures surfaced to the user inside the dashboard panels.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Search failed: {0}")]
    Search(#[from] market::AdapterError),
    #[error("{0}")]
    Portfolio(#[from] data::PortfolioError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_read_as_user_notices() {
        let search = DashboardError::from(market::AdapterError::ParseError("bad listing".into()));
        assert_eq!(search.to_string(), "Search failed: Parsing: bad listing");

        let portfolio = DashboardError::from(data::PortfolioError::NoActiveStock);
        assert_eq!(portfolio.to_string(), "No stock selected");
    }
}
