pub mod chart;
pub mod config;
pub mod portfolio;
pub mod util;

pub use chart::{DateRange, Series, StockDataPoint};
pub use config::State;
pub use portfolio::{Portfolio, PortfolioError, Purchase, Stock};
