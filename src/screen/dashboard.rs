use crate::style;
use crate::widget::RangeTabs;
use crate::widget::chart::comparison::LineComparison;

use data::config::state::ChartCfg;
use data::{DateRange, Series};

use iced::widget::{Row, column, container, row, space, text};
use iced::{Alignment, Color, Element, Length};

/// Room kept free beside the chart inside its pane.
pub const VIEWPORT_GUTTER: f32 = 40.0;

#[derive(Debug, Clone, Copy)]
pub enum Message {
    SelectRange(DateRange),
}

pub struct Dashboard {
    range: DateRange,
    symbols: Vec<(String, Color)>,
    series: Vec<Series>,
    version: u64,
    viewport_width: f32,
    chart_width: f32,
    chart: ChartCfg,
}

impl Dashboard {
    pub fn new(cfg: &data::State, viewport_width: f32) -> Self {
        let mut dashboard = Self {
            range: cfg.default_range,
            symbols: cfg.comparison.assign(&cfg.symbols),
            series: Vec::new(),
            version: 0,
            viewport_width,
            chart_width: 0.0,
            chart: cfg.chart,
        };
        dashboard.regenerate();
        dashboard
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SelectRange(range) => {
                self.range = range;
                self.regenerate();
            }
        }
    }

    /// Only remembered; the chart keeps its width until the next regeneration.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn chart_width(&self) -> f32 {
        self.chart_width
    }

    fn regenerate(&mut self) {
        self.series = data::chart::generate_all(self.range, &self.symbols);
        self.version = self.version.wrapping_add(1);
        self.chart_width = chart_width(self.chart.max_width, self.viewport_width);

        log::debug!(
            "Regenerated {} series for {} ({} days), chart width {}",
            self.series.len(),
            self.range,
            self.range.day_count(),
            self.chart_width
        );
    }

    pub fn view(&self) -> Element<'_, Message> {
        let legend = Row::with_children(self.symbols.iter().map(|(symbol, color)| {
            row![
                container(
                    space::horizontal()
                        .width(Length::Fixed(10.0))
                        .height(Length::Fixed(10.0))
                )
                .style(style::legend_dot(*color)),
                text(symbol.as_str()).size(13),
            ]
            .spacing(6)
            .align_y(Alignment::Center)
            .into()
        }))
        .spacing(20);

        let chart = LineComparison::new(self.series(), self.chart_width(), self.chart.height)
            .version(self.version);

        let tabs = container(RangeTabs::new(self.range(), Message::SelectRange))
            .style(style::tab_strip);

        container(
            column![
                text("Stock Growth Comparison").size(20),
                legend,
                chart,
                tabs,
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        )
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::dashboard)
        .into()
    }
}

/// `min(max_width, viewport - gutter)`, never negative.
pub fn chart_width(max_width: f32, viewport_width: f32) -> f32 {
    max_width.min(viewport_width - VIEWPORT_GUTTER).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(viewport: f32) -> Dashboard {
        Dashboard::new(&data::State::default(), viewport)
    }

    #[test]
    fn starts_with_one_month_of_both_stocks() {
        let dashboard = dashboard(1600.0);

        assert_eq!(dashboard.range(), DateRange::OneMonth);
        let symbols: Vec<&str> = dashboard.series().iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["Stock A", "Stock B"]);
        assert!(dashboard.series().iter().all(|s| s.points.len() == 31));
    }

    #[test]
    fn selecting_range_replaces_every_series() {
        let mut dashboard = dashboard(1600.0);
        let version = dashboard.version;

        dashboard.update(Message::SelectRange(DateRange::OneWeek));

        assert_eq!(dashboard.version, version + 1);
        assert_eq!(dashboard.series().len(), 2);
        for series in dashboard.series() {
            assert_eq!(series.points.len(), 8);
            assert!(series.points.iter().all(|p| p.symbol == series.symbol));
        }
    }

    #[test]
    fn reselecting_same_range_still_regenerates() {
        let mut dashboard = dashboard(1600.0);
        let version = dashboard.version;

        dashboard.update(Message::SelectRange(DateRange::OneMonth));
        dashboard.update(Message::SelectRange(DateRange::OneMonth));

        assert_eq!(dashboard.version, version + 2);
    }

    #[test]
    fn width_follows_viewport_only_on_regeneration() {
        let mut dashboard = dashboard(800.0);
        assert_eq!(dashboard.chart_width(), 760.0);

        dashboard.set_viewport_width(500.0);
        assert_eq!(dashboard.chart_width(), 760.0);

        dashboard.update(Message::SelectRange(DateRange::OneYear));
        assert_eq!(dashboard.chart_width(), 460.0);
    }

    #[test]
    fn width_is_capped() {
        assert_eq!(chart_width(1200.0, 2000.0), 1200.0);
        assert_eq!(chart_width(1200.0, 900.0), 860.0);
        assert_eq!(chart_width(1200.0, 10.0), 0.0);
    }
}
