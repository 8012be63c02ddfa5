use chrono::{TimeZone, Utc};

const S: i64 = 1_000;
const M: i64 = 60 * S;
const H: i64 = 60 * M;
const D: i64 = 24 * H;

/// Maps epoch milliseconds onto a horizontal pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min_ms: i64,
    max_ms: i64,
    width: f32,
}

impl TimeScale {
    pub fn new(min_ms: i64, max_ms: i64, width: f32) -> Self {
        // a single-instant domain still needs a non-zero span
        let max_ms = if max_ms <= min_ms { min_ms + 1 } else { max_ms };
        Self {
            min_ms,
            max_ms,
            width,
        }
    }

    fn span(&self) -> f64 {
        (self.max_ms - self.min_ms) as f64
    }

    pub fn map(&self, ms: i64) -> f32 {
        ((ms - self.min_ms) as f64 / self.span() * f64::from(self.width)) as f32
    }

    pub fn invert(&self, px: f32) -> i64 {
        if self.width <= 0.0 {
            return self.min_ms;
        }
        let t = f64::from(px) / f64::from(self.width);
        self.min_ms + (t * self.span()).round() as i64
    }

    /// Tick positions at least `min_px` apart, aligned to a calendar-ish step.
    pub fn ticks(&self, min_px: f32) -> (Vec<i64>, i64) {
        let px_per_ms = f64::from(self.width) / self.span();

        let mut step = TIME_TICK_CANDIDATES[0];
        for &candidate in TIME_TICK_CANDIDATES {
            step = candidate;
            if candidate as f64 * px_per_ms >= f64::from(min_px) {
                break;
            }
        }

        let first = self.min_ms.div_euclid(step) * step;
        let first = if first < self.min_ms {
            first + step
        } else {
            first
        };

        let mut out = Vec::new();
        let mut t = first;
        while t <= self.max_ms && out.len() <= 2000 {
            out.push(t);
            t += step;
        }
        (out, step)
    }
}

const TIME_TICK_CANDIDATES: &[i64] = &[
    H,
    2 * H,
    4 * H,
    6 * H,
    12 * H, //
    D,
    2 * D,
    7 * D,
    14 * D, //
    30 * D,
    90 * D,
    180 * D,
    365 * D,
];

pub fn format_time_label(ts_ms: i64, step_ms: i64) -> String {
    let Some(dt) = Utc.timestamp_millis_opt(ts_ms).single() else {
        return String::new();
    };

    if step_ms < D {
        dt.format("%H:%M").to_string()
    } else if step_ms < 30 * D {
        dt.format("%b %d").to_string()
    } else if step_ms < 365 * D {
        dt.format("%b %Y").to_string()
    } else {
        dt.format("%Y").to_string()
    }
}

/// Maps values onto a vertical pixel span, larger values towards the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
    height: f32,
}

impl LinearScale {
    pub fn new(min: f64, max: f64, height: f32) -> Self {
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min.min(max), min.max(max))
        };
        Self { min, max, height }
    }

    pub fn map(&self, value: f64) -> f32 {
        let t = (value - self.min) / (self.max - self.min);
        (f64::from(self.height) * (1.0 - t)) as f32
    }

    /// Round-number ticks inside the domain, plus the step between them.
    pub fn ticks(&self, target: usize) -> (Vec<f64>, f64) {
        let step = nice_step(self.max - self.min, target);
        let start = (self.min / step).ceil() * step;

        let mut v = Vec::new();
        let mut t = start;
        while t <= self.max + step * 1e-9 && v.len() < 100 {
            v.push(t);
            t += step;
        }
        (v, step)
    }
}

/// A step close to `range / target` from the 1/2/5 × 10^k family.
pub fn nice_step(range: f64, target: usize) -> f64 {
    let target = target.max(2) as f64;
    let raw = (range.abs() / target).max(f64::EPSILON);
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}
