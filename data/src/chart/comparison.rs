use crate::config::theme::hex_to_color;

use iced_core::Color;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Line colors by symbol order; wraps around past the end.
pub const SERIES_PALETTE: [&str; 6] = [
    "#4ade80", "#ef4444", "#60a5fa", "#facc15", "#c084fc", "#f97316",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Per-symbol overrides of the palette color, as hex strings
    #[serde(default)]
    pub colors: FxHashMap<String, String>,
}

impl Config {
    pub fn color_for(&self, index: usize, symbol: &str) -> Color {
        self.colors
            .get(symbol)
            .and_then(|hex| {
                let parsed = hex_to_color(hex);
                if parsed.is_none() {
                    log::warn!("Ignoring invalid color {hex:?} for {symbol}");
                }
                parsed
            })
            .unwrap_or_else(|| palette_color(index))
    }

    /// Pairs every symbol with its line color.
    pub fn assign(&self, symbols: &[String]) -> Vec<(String, Color)> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (symbol.clone(), self.color_for(i, symbol)))
            .collect()
    }
}

pub fn palette_color(index: usize) -> Color {
    hex_to_color(SERIES_PALETTE[index % SERIES_PALETTE.len()]).unwrap_or(Color::WHITE)
}
