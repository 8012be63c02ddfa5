use super::AdapterError;
use crate::CompanyMatch;

use std::time::Duration;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

const LISTING: &str = r#"[
    { "symbol": "AAPL", "name": "Apple Inc." },
    { "symbol": "GOOGL", "name": "Alphabet Inc." },
    { "symbol": "MSFT", "name": "Microsoft Corporation" },
    { "symbol": "AMZN", "name": "Amazon.com, Inc." }
]"#;

fn listing() -> Result<Vec<CompanyMatch>, AdapterError> {
    serde_json::from_str(LISTING)
        .map_err(|e| AdapterError::ParseError(format!("Failed to parse company listing: {e}")))
}

/// Filters the listing without the artificial delay.
pub fn search(query: &str) -> Result<Vec<CompanyMatch>, AdapterError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    Ok(listing()?
        .into_iter()
        .filter(|company| company.matches(query))
        .collect())
}

pub async fn fetch_companies(
    query: &str,
    latency: Duration,
) -> Result<Vec<CompanyMatch>, AdapterError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    tokio::time::sleep(latency).await;

    let companies = search(query)?;
    log::debug!("Directory lookup for {query:?} resolved {} matches", companies.len());

    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_symbol_returns_single_company() {
        let found = search("AAPL").unwrap();
        assert_eq!(found, vec![CompanyMatch::new("AAPL", "Apple Inc.")]);
    }

    #[test]
    fn single_letter_matches_every_entry() {
        let found = search("a").unwrap();
        let symbols: Vec<&str> = found.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOGL", "MSFT", "AMZN"]);
    }

    #[test]
    fn name_fragment_matches_case_insensitively() {
        let found = search("corporation").unwrap();
        assert_eq!(found, vec![CompanyMatch::new("MSFT", "Microsoft Corporation")]);
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search("").unwrap().is_empty());
    }

    #[test]
    fn unknown_query_returns_nothing() {
        assert!(search("tsla").unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_latency_before_resolving() {
        let started = tokio::time::Instant::now();
        let found = fetch_companies("goog", DEFAULT_LATENCY).await.unwrap();

        assert_eq!(found, vec![CompanyMatch::new("GOOGL", "Alphabet Inc.")]);
        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_with_empty_query_skips_latency() {
        let started = tokio::time::Instant::now();
        let found = fetch_companies("", DEFAULT_LATENCY).await.unwrap();

        assert!(found.is_empty());
        assert!(started.elapsed() < DEFAULT_LATENCY);
    }
}
