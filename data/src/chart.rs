pub mod comparison;
pub mod crosshair;
pub mod scale;

use chrono::{Days, NaiveDate, NaiveTime};
use enum_map::Enum;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Amount every synthetic series starts from, and the baseline growth is measured against.
pub const BASELINE_VALUE: f64 = 10_000.0;

/// Half-width of the uniform daily change applied by the generator.
pub const MAX_DAILY_CHANGE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl DateRange {
    /// Tab order, left to right.
    pub fn all() -> impl Iterator<Item = DateRange> {
        (0..<DateRange as Enum>::LENGTH).map(<DateRange as Enum>::from_usize)
    }

    pub fn day_count(self) -> u32 {
        match self {
            DateRange::OneDay => 1,
            DateRange::OneWeek => 7,
            DateRange::OneMonth => 30,
            DateRange::ThreeMonths => 90,
            DateRange::OneYear => 365,
            DateRange::All => 1825,
        }
    }

    /// Position of this range among the selector tabs.
    pub fn index(self) -> usize {
        self.into_usize()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DateRange::OneDay => "1D",
                DateRange::OneWeek => "1W",
                DateRange::OneMonth => "1M",
                DateRange::ThreeMonths => "3M",
                DateRange::OneYear => "1Y",
                DateRange::All => "ALL",
            }
        )
    }
}

impl std::str::FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::all()
            .find(|range| range.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown date range: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockDataPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub percentage_growth: f64,
    pub symbol: String,
}

impl StockDataPoint {
    pub fn new(date: NaiveDate, value: f64, symbol: impl Into<String>) -> Self {
        Self {
            date,
            value,
            percentage_growth: percentage_growth(value),
            symbol: symbol.into(),
        }
    }

    /// Milliseconds since the epoch at midnight UTC of `date`.
    pub fn timestamp_ms(&self) -> i64 {
        date_to_ms(self.date)
    }
}

pub fn percentage_growth(value: f64) -> f64 {
    (value - BASELINE_VALUE) / BASELINE_VALUE * 100.0
}

pub fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

#[derive(Debug, Clone)]
pub struct Series {
    pub symbol: String,
    pub points: Vec<StockDataPoint>,
    pub color: iced_core::Color,
}

impl Series {
    pub fn new(symbol: impl Into<String>, color: iced_core::Color) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
            color,
        }
    }

    pub fn with_points(mut self, points: Vec<StockDataPoint>) -> Self {
        self.points = points;
        self
    }
}

/// Random walk of `days + 1` daily points ending on `today`.
pub fn generate_series_with<R: Rng + ?Sized>(
    rng: &mut R,
    days: u32,
    symbol: &str,
    today: NaiveDate,
) -> Vec<StockDataPoint> {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);

    let mut value = BASELINE_VALUE;
    let mut points = Vec::with_capacity(days as usize + 1);

    for date in start.iter_days().take(days as usize + 1) {
        value += (rng.r#gen::<f64>() - 0.5) * 2.0 * MAX_DAILY_CHANGE;
        points.push(StockDataPoint::new(date, value, symbol));
    }

    points
}

pub fn generate_series(days: u32, symbol: &str) -> Vec<StockDataPoint> {
    let today = chrono::Local::now().date_naive();
    generate_series_with(&mut rand::thread_rng(), days, symbol, today)
}

/// Builds a fresh series for every `(symbol, color)` pair; nothing is carried over.
pub fn generate_all(range: DateRange, symbols: &[(String, iced_core::Color)]) -> Vec<Series> {
    let days = range.day_count();

    symbols
        .iter()
        .map(|(symbol, color)| {
            Series::new(symbol.clone(), *color).with_points(generate_series(days, symbol))
        })
        .collect()
}

/// Date and value bounds across every series, as `((min_date, max_date), (min_value, max_value))`.
pub fn extent<'a, I>(series: I) -> Option<((NaiveDate, NaiveDate), (f64, f64))>
where
    I: IntoIterator<Item = &'a [StockDataPoint]>,
{
    let mut points = series.into_iter().flatten();
    let first = points.next()?;

    let mut dates = (first.date, first.date);
    let mut values = (first.value, first.value);

    for p in points {
        dates.0 = dates.0.min(p.date);
        dates.1 = dates.1.max(p.date);
        values.0 = values.0.min(p.value);
        values.1 = values.1.max(p.value);
    }

    Some((dates, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_counts_follow_tab_labels() {
        let counts: Vec<(String, u32)> = DateRange::all()
            .map(|r| (r.to_string(), r.day_count()))
            .collect();

        assert_eq!(
            counts,
            vec![
                ("1D".to_string(), 1),
                ("1W".to_string(), 7),
                ("1M".to_string(), 30),
                ("3M".to_string(), 90),
                ("1Y".to_string(), 365),
                ("ALL".to_string(), 1825),
            ]
        );
    }

    #[test]
    fn range_round_trips_through_label_and_index() {
        for (i, range) in DateRange::all().enumerate() {
            assert_eq!(range.index(), i);
            assert_eq!(range.to_string().parse::<DateRange>(), Ok(range));
        }
        assert!("2W".parse::<DateRange>().is_err());
    }

    #[test]
    fn range_serializes_as_label() {
        let json = serde_json::to_string(&DateRange::ThreeMonths).unwrap();
        assert_eq!(json, "\"3M\"");
        let back: DateRange = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(back, DateRange::All);
    }

    #[test]
    fn generates_one_point_per_day_through_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = day(2024, 3, 10);

        for range in DateRange::all() {
            let days = range.day_count();
            let points = generate_series_with(&mut rng, days, "Stock A", today);

            assert_eq!(points.len(), days as usize + 1);
            assert_eq!(points.first().unwrap().date, today - Days::new(u64::from(days)));
            assert_eq!(points.last().unwrap().date, today);

            for pair in points.windows(2) {
                assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
        }
    }

    #[test]
    fn growth_is_measured_against_baseline() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = generate_series_with(&mut rng, 90, "Stock B", day(2024, 1, 1));

        for p in &points {
            assert_eq!(p.percentage_growth, (p.value - 10000.0) / 10000.0 * 100.0);
            assert_eq!(p.symbol, "Stock B");
        }
    }

    #[test]
    fn daily_change_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = generate_series_with(&mut rng, 365, "Stock A", day(2024, 6, 1));

        assert!((points[0].value - BASELINE_VALUE).abs() <= MAX_DAILY_CHANGE);
        for pair in points.windows(2) {
            assert!((pair[1].value - pair[0].value).abs() <= MAX_DAILY_CHANGE);
        }
    }

    #[test]
    fn distinct_calls_produce_distinct_walks() {
        let a = generate_series(30, "Stock A");
        let b = generate_series(30, "Stock A");

        assert_eq!(a.len(), b.len());
        assert_ne!(
            a.iter().map(|p| p.value).collect::<Vec<_>>(),
            b.iter().map(|p| p.value).collect::<Vec<_>>()
        );
    }

    #[test]
    fn regenerating_replaces_every_series() {
        let symbols = vec![
            ("Stock A".to_string(), iced_core::Color::WHITE),
            ("Stock B".to_string(), iced_core::Color::BLACK),
        ];

        let month = generate_all(DateRange::OneMonth, &symbols);
        let week = generate_all(DateRange::OneWeek, &symbols);

        assert_eq!(month.len(), 2);
        assert!(month.iter().all(|s| s.points.len() == 31));
        assert!(week.iter().all(|s| s.points.len() == 8));

        let ((min_date, max_date), _) = extent(week.iter().map(|s| s.points.as_slice())).unwrap();
        assert_eq!((max_date - min_date).num_days(), 7);
    }

    #[test]
    fn extent_spans_all_series() {
        let a = Series::new("A", iced_core::Color::WHITE).with_points(vec![
            StockDataPoint::new(day(2024, 1, 1), 9_900.0, "A"),
            StockDataPoint::new(day(2024, 1, 2), 10_100.0, "A"),
        ]);
        let b = Series::new("B", iced_core::Color::BLACK).with_points(vec![
            StockDataPoint::new(day(2024, 1, 1), 10_400.0, "B"),
            StockDataPoint::new(day(2024, 1, 3), 9_700.0, "B"),
        ]);

        let ((min_d, max_d), (min_v, max_v)) =
            extent([a.points.as_slice(), b.points.as_slice()]).unwrap();
        assert_eq!((min_d, max_d), (day(2024, 1, 1), day(2024, 1, 3)));
        assert_eq!((min_v, max_v), (9_700.0, 10_400.0));

        assert!(extent(std::iter::empty::<&[StockDataPoint]>()).is_none());
    }
}
