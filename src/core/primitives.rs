use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{PlotDataError, PlotDataResult};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> PlotDataResult<f64> {
    value.to_f64().ok_or_else(|| {
        PlotDataError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Fraction of the day elapsed at `time`, ignoring sub-second precision.
#[must_use]
pub fn total_days(time: NaiveDateTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / SECONDS_PER_DAY
}

/// Day of year (1-based) plus the elapsed fraction of that day.
#[must_use]
pub fn fractional_day_of_year(time: NaiveDateTime) -> f64 {
    f64::from(time.ordinal()) + total_days(time)
}

/// `count` values starting at `start`, each `interval` apart, or `None` when a
/// value would overflow `i64`.
#[must_use]
pub fn intervalspace(start: i64, count: usize, interval: i64) -> Option<Vec<i64>> {
    let mut out = Vec::with_capacity(count);
    let mut next = Some(start);
    for _ in 0..count {
        let value = next?;
        out.push(value);
        next = value.checked_add(interval);
    }
    Some(out)
}

/// `start` shifted by `offset_secs`, or `None` outside chrono's date range.
#[must_use]
pub fn offset_instant(start: NaiveDateTime, offset_secs: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_seconds(offset_secs).and_then(|delta| start.checked_add_signed(delta))
}

/// `count` evenly spaced values over `[start, end]`, both ends included exactly.
///
/// Returns `[start]` for `count == 1` and an empty vector for `count == 0`.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let steps = count - 1;
    let interval = (end - start) / steps as f64;
    let mut out = Vec::with_capacity(count);
    out.push(start);
    let mut last = start;
    for _ in 1..steps {
        last += interval;
        out.push(last);
    }
    out.push(end);
    out
}
