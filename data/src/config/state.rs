use crate::DateRange;
use crate::chart::comparison;
use crate::util::ok_or_default;

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ChartCfg {
    /// Upper bound of the chart's outer width, in logical pixels
    pub max_width: f32,
    pub height: f32,
}

impl Default for ChartCfg {
    fn default() -> Self {
        ChartCfg {
            max_width: 1200.0,
            height: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SearchCfg {
    pub debounce_ms: u64,
    pub latency_ms: u64,
    pub directory: market::Directory,
}

impl Default for SearchCfg {
    fn default() -> Self {
        SearchCfg {
            debounce_ms: 300,
            latency_ms: 500,
            directory: market::Directory::default(),
        }
    }
}

impl SearchCfg {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct State {
    pub symbols: Vec<String>,
    #[serde(deserialize_with = "ok_or_default")]
    pub default_range: DateRange,
    pub chart: ChartCfg,
    pub search: SearchCfg,
    pub comparison: comparison::Config,
}

impl Default for State {
    fn default() -> Self {
        State {
            symbols: vec!["Stock A".to_string(), "Stock B".to_string()],
            default_range: DateRange::default(),
            chart: ChartCfg::default(),
            search: SearchCfg::default(),
            comparison: comparison::Config::default(),
        }
    }
}
