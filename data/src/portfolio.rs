use chrono::NaiveDate;
use market::CompanyMatch;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("Invalid amount {0:?}: enter a positive number")]
    InvalidAmount(String),
    #[error("Invalid date {0:?}: use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No stock selected")]
    NoActiveStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub date: NaiveDate,
    pub amount: f64,
}

impl Purchase {
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self { date, amount }
    }

    /// Validates raw form input.
    pub fn parse(amount: &str, date: &str) -> Result<Self, PortfolioError> {
        let amount = parse_amount(amount)?;
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| PortfolioError::InvalidDate(date.to_string()))?;

        Ok(Self::new(amount, date))
    }
}

fn parse_amount(raw: &str) -> Result<f64, PortfolioError> {
    let trimmed = raw.trim().trim_start_matches('$').replace(',', "");

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(PortfolioError::InvalidAmount(raw.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub purchases: Vec<Purchase>,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            purchases: Vec::new(),
        }
    }

    pub fn total_invested(&self) -> f64 {
        self.purchases.iter().map(|p| p.amount).sum()
    }
}

impl From<&CompanyMatch> for Stock {
    fn from(company: &CompanyMatch) -> Self {
        Stock::new(company.symbol.clone(), company.name.clone())
    }
}

/// The single active stock selection and its purchases.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    active: Option<Stock>,
}

impl Portfolio {
    pub fn active(&self) -> Option<&Stock> {
        self.active.as_ref()
    }

    /// Replaces any previous selection, dropping its purchases.
    pub fn select(&mut self, company: &CompanyMatch) -> &Stock {
        if let Some(previous) = &self.active {
            log::debug!(
                "Replacing {} ({} purchases) with {}",
                previous.symbol,
                previous.purchases.len(),
                company.symbol
            );
        }
        self.active.insert(Stock::from(company))
    }

    pub fn add_purchase(&mut self, purchase: Purchase) -> Result<(), PortfolioError> {
        let stock = self.active.as_mut().ok_or(PortfolioError::NoActiveStock)?;
        stock.purchases.push(purchase);
        Ok(())
    }

    /// Removes the purchase at `index`; out-of-range indices leave the list untouched.
    pub fn remove_purchase(&mut self, index: usize) -> Option<Purchase> {
        let stock = self.active.as_mut()?;
        (index < stock.purchases.len()).then(|| stock.purchases.remove(index))
    }
}
