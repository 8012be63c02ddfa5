pub mod comparison;

use data::{Series, StockDataPoint};

pub trait SeriesLike {
    fn symbol(&self) -> &str;
    fn points(&self) -> &[StockDataPoint];
    fn color(&self) -> iced::Color;
}

impl SeriesLike for Series {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn points(&self) -> &[StockDataPoint] {
        &self.points
    }

    fn color(&self) -> iced::Color {
        self.color
    }
}

/// Currency label for a value-axis tick; cents only show up once the step drops below a dollar.
fn format_value_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        data::util::format_usd_whole(value)
    } else {
        data::util::format_usd(value)
    }
}

/// Y position of the `index`-th hover label below its marker, `1.2em` per row.
fn label_offset_y(index: usize, text_size: f32) -> f32 {
    text_size * 1.2 * (index as f32 + 1.0)
}
