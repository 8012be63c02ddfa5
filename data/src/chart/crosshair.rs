//! Pointer-driven lookups for the comparison chart.
//!
//! Everything here works on the series snapshot handed in by the caller, so a
//! hover is always resolved against the data that is currently drawn.

use super::StockDataPoint;

pub const MIN_FADE_OPACITY: f32 = 0.5;

/// Index of the first point at or after `ts_ms`, searching from `lo`.
pub fn bisect_left(points: &[StockDataPoint], ts_ms: i64, lo: usize) -> usize {
    let lo = lo.min(points.len());
    lo + points[lo..].partition_point(|p| p.timestamp_ms() < ts_ms)
}

/// The chronologically closer of the two points bracketing `ts_ms`; equal distances pick the earlier one.
pub fn nearest_point(points: &[StockDataPoint], ts_ms: i64) -> Option<&StockDataPoint> {
    let i = bisect_left(points, ts_ms, 1);

    match (points.get(i.wrapping_sub(1)), points.get(i)) {
        (Some(d0), Some(d1)) => {
            if ts_ms - d0.timestamp_ms() > d1.timestamp_ms() - ts_ms {
                Some(d1)
            } else {
                Some(d0)
            }
        }
        (Some(d0), None) => Some(d0),
        (None, _) => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hover<'a> {
    /// Globally closest point, where the vertical guide is drawn
    pub anchor: &'a StockDataPoint,
    /// Each series' own closest point, in series order
    pub markers: Vec<Option<&'a StockDataPoint>>,
}

/// Resolves the cursor date against every series.
///
/// Series are compared in order and the first one wins ties for the anchor.
pub fn resolve<'a, I>(series: I, ts_ms: i64) -> Option<Hover<'a>>
where
    I: IntoIterator<Item = &'a [StockDataPoint]>,
{
    let mut anchor: Option<&StockDataPoint> = None;
    let mut min_distance = i64::MAX;

    let markers: Vec<Option<&StockDataPoint>> = series
        .into_iter()
        .map(|points| {
            let closest = nearest_point(points, ts_ms);
            if let Some(point) = closest {
                let distance = (ts_ms - point.timestamp_ms()).abs();
                if distance < min_distance {
                    min_distance = distance;
                    anchor = Some(point);
                }
            }
            closest
        })
        .collect();

    anchor.map(|anchor| Hover { anchor, markers })
}

pub fn tooltip_text(point: &StockDataPoint) -> String {
    format!(
        "{}: ${:.2} ({:.2}%)",
        point.symbol, point.value, point.percentage_growth
    )
}

/// Stroke opacity of a polyline for the guide at `guide_x`.
///
/// Walks `guide_x` pixels along the path, then maps the x of the point reached
/// from `[0, path length]` onto `[1.0, 0.5]`. The guide position is shared by all
/// series while the geometry is each path's own.
pub fn fade_opacity(path: &[(f32, f32)], guide_x: f32) -> f32 {
    let total = path_length(path);
    if total <= f32::EPSILON {
        return 1.0;
    }

    let Some((x, _)) = point_at_length(path, guide_x) else {
        return 1.0;
    };

    let t = x / total;
    (1.0 - t * (1.0 - MIN_FADE_OPACITY)).clamp(MIN_FADE_OPACITY, 1.0)
}

pub fn path_length(path: &[(f32, f32)]) -> f32 {
    path.windows(2)
        .map(|w| segment_length(w[0], w[1]))
        .sum()
}

/// Point reached after travelling `length` along the path, clamped to its ends.
pub fn point_at_length(path: &[(f32, f32)], length: f32) -> Option<(f32, f32)> {
    let first = *path.first()?;
    if length <= 0.0 {
        return Some(first);
    }

    let mut remaining = length;
    for w in path.windows(2) {
        let seg = segment_length(w[0], w[1]);
        if seg >= remaining && seg > 0.0 {
            let t = remaining / seg;
            return Some((
                w[0].0 + (w[1].0 - w[0].0) * t,
                w[0].1 + (w[1].1 - w[0].1) * t,
            ));
        }
        remaining -= seg;
    }

    path.last().copied()
}

fn segment_length(a: (f32, f32), b: (f32, f32)) -> f32 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY_MS: i64 = 86_400_000;

    fn series(symbol: &str, values: &[f64]) -> Vec<StockDataPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        start
            .iter_days()
            .zip(values)
            .map(|(date, value)| StockDataPoint::new(date, *value, symbol))
            .collect()
    }

    fn day_ms(offset: i64) -> i64 {
        series("x", &[0.0])[0].timestamp_ms() + offset * DAY_MS
    }

    #[test]
    fn bisect_finds_first_point_not_before_cursor() {
        let pts = series("A", &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(bisect_left(&pts, day_ms(0), 1), 1);
        assert_eq!(bisect_left(&pts, day_ms(1), 1), 1);
        assert_eq!(bisect_left(&pts, day_ms(1) + 1, 1), 2);
        assert_eq!(bisect_left(&pts, day_ms(3), 1), 3);
        assert_eq!(bisect_left(&pts, day_ms(9), 1), 4);
    }

    #[test]
    fn nearest_picks_closer_bracketing_point() {
        let pts = series("A", &[10.0, 20.0, 30.0]);

        let early = nearest_point(&pts, day_ms(1) + DAY_MS / 4).unwrap();
        assert_eq!(early.value, 20.0);

        let late = nearest_point(&pts, day_ms(1) + 3 * DAY_MS / 4).unwrap();
        assert_eq!(late.value, 30.0);
    }

    #[test]
    fn equal_distance_prefers_earlier_point() {
        let pts = series("A", &[10.0, 20.0]);
        let mid = nearest_point(&pts, day_ms(0) + DAY_MS / 2).unwrap();
        assert_eq!(mid.value, 10.0);
    }

    #[test]
    fn cursor_past_last_point_sticks_to_it() {
        let pts = series("A", &[10.0, 20.0]);
        assert_eq!(nearest_point(&pts, day_ms(5)).unwrap().value, 20.0);
        assert!(nearest_point(&[], day_ms(0)).is_none());
    }

    #[test]
    fn resolve_tracks_global_anchor_and_per_series_markers() {
        let a = series("Stock A", &[10_000.0, 10_050.0, 10_020.0]);
        let b = series("Stock B", &[10_000.0, 9_990.0]);

        let hover = resolve([a.as_slice(), b.as_slice()], day_ms(2)).unwrap();

        assert_eq!(hover.anchor.symbol, "Stock A");
        assert_eq!(hover.anchor.date, a[2].date);
        assert_eq!(hover.markers[0].unwrap().value, 10_020.0);
        assert_eq!(hover.markers[1].unwrap().value, 9_990.0);
    }

    #[test]
    fn resolve_prefers_first_series_on_ties() {
        let a = series("Stock A", &[1.0, 2.0]);
        let b = series("Stock B", &[3.0, 4.0]);

        let hover = resolve([a.as_slice(), b.as_slice()], day_ms(1)).unwrap();
        assert_eq!(hover.anchor.symbol, "Stock A");
    }

    #[test]
    fn resolve_without_points_is_none() {
        let empty: Vec<StockDataPoint> = Vec::new();
        assert!(resolve([empty.as_slice()], day_ms(0)).is_none());
    }

    #[test]
    fn tooltip_uses_two_decimals() {
        let point = StockDataPoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10_123.456, "Stock A");
        assert_eq!(tooltip_text(&point), "Stock A: $10123.46 (1.23%)");
    }

    #[test]
    fn fade_runs_from_full_to_half_opacity() {
        let flat = [(0.0, 50.0), (100.0, 50.0), (200.0, 50.0)];

        assert_eq!(fade_opacity(&flat, 0.0), 1.0);
        assert_eq!(fade_opacity(&flat, 100.0), 0.75);
        assert_eq!(fade_opacity(&flat, 200.0), 0.5);
        assert_eq!(fade_opacity(&flat, 400.0), 0.5);
    }

    #[test]
    fn fade_uses_path_geometry_not_raw_pixel() {
        // steep first leg: walking 100px along the path only advances x by 60
        let steep = [(0.0, 0.0), (60.0, 80.0), (160.0, 80.0)];
        let opacity = fade_opacity(&steep, 100.0);

        assert!((opacity - (1.0 - 0.5 * 60.0 / 200.0)).abs() < 1e-6);
    }

    #[test]
    fn degenerate_paths_stay_opaque() {
        assert_eq!(fade_opacity(&[], 10.0), 1.0);
        assert_eq!(fade_opacity(&[(5.0, 5.0)], 10.0), 1.0);
    }

    #[test]
    fn point_at_length_interpolates_along_segments() {
        let path = [(0.0, 0.0), (30.0, 40.0), (30.0, 100.0)];

        assert_eq!(point_at_length(&path, 25.0), Some((15.0, 20.0)));
        assert_eq!(point_at_length(&path, 60.0), Some((30.0, 50.0)));
        assert_eq!(point_at_length(&path, 1_000.0), Some((30.0, 100.0)));
    }
}
