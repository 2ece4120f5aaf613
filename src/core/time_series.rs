use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::RunningStats;
use crate::core::primitives::{
    SECONDS_PER_DAY, decimal_to_f64, fractional_day_of_year, intervalspace, offset_instant,
};
use crate::error::{PlotDataError, PlotDataResult};

/// Slack applied when matching a lookup time against report offsets, in seconds.
const LOOKUP_TOLERANCE_SECS: f64 = 1e-3;

/// Ordered report samples anchored at an absolute start time.
///
/// Invariants:
/// - `offsets.len() == values.len() >= 1`
/// - offsets are seconds from `start`
///
/// The series is immutable once built. Statistics are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    start: NaiveDateTime,
    offsets: Vec<i64>,
    values: Vec<f64>,
    units: String,
    interval: Option<i64>,
    out_of_range_value: f64,
}

impl TimeSeries {
    /// Builds a series from raw offsets and values.
    ///
    /// Mismatched inputs are truncated to the shorter length. When that length
    /// is zero the series holds one zero-valued sample at offset zero.
    #[must_use]
    pub fn new(start: NaiveDateTime, mut offsets: Vec<i64>, mut values: Vec<f64>) -> Self {
        let len = offsets.len().min(values.len());
        if offsets.len() != values.len() {
            warn!(
                offsets = offsets.len(),
                values = values.len(),
                kept = len,
                "time series inputs disagree in length, truncating"
            );
        }

        if len == 0 {
            offsets = vec![0];
            values = vec![0.0];
        } else {
            offsets.truncate(len);
            values.truncate(len);
        }

        if offsets[0] < 0 || offsets.windows(2).any(|pair| pair[1] < pair[0]) {
            warn!("time series offsets are negative or decreasing");
        }

        debug!(
            %start,
            samples = values.len(),
            "built time series"
        );

        Self {
            start,
            offsets,
            values,
            units: String::new(),
            interval: None,
            out_of_range_value: 0.0,
        }
    }

    /// Builds a uniformly spaced series whose first report lands one interval after `start`.
    pub fn from_interval(
        start: NaiveDateTime,
        interval_secs: i64,
        values: Vec<f64>,
    ) -> PlotDataResult<Self> {
        if interval_secs <= 0 {
            return Err(PlotDataError::InvalidData(
                "time series interval must be > 0 seconds".to_owned(),
            ));
        }

        let offsets = intervalspace(interval_secs, values.len(), interval_secs).ok_or_else(|| {
            PlotDataError::InvalidData("time series offsets overflow i64 seconds".to_owned())
        })?;
        let mut series = Self::new(start, offsets, values);
        validate_offsets(series.start, &series.offsets)?;
        series.interval = Some(interval_secs);
        Ok(series)
    }

    /// Converts decimal report values, failing on values outside `f64` range.
    pub fn from_decimal_values(
        start: NaiveDateTime,
        offsets: Vec<i64>,
        values: &[Decimal],
    ) -> PlotDataResult<Self> {
        let values = values
            .iter()
            .map(|value| decimal_to_f64(*value, "time series value"))
            .collect::<PlotDataResult<Vec<_>>>()?;
        let series = Self::new(start, offsets, values);
        validate_offsets(series.start, &series.offsets)?;
        Ok(series)
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Sets the value returned by lookups outside the reported span.
    #[must_use]
    pub fn with_out_of_range_value(mut self, value: f64) -> Self {
        self.out_of_range_value = value;
        self
    }

    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Fixed report interval in seconds, only known for interval-built series.
    #[must_use]
    pub fn interval(&self) -> Option<i64> {
        self.interval
    }

    #[must_use]
    pub fn out_of_range_value(&self) -> f64 {
        self.out_of_range_value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Calendar instant of the first report, or `None` when the offset leaves
    /// chrono's date range.
    #[must_use]
    pub fn first_report_instant(&self) -> Option<NaiveDateTime> {
        offset_instant(self.start, self.offsets[0])
    }

    /// Day of year of the first report plus the elapsed fraction of that day.
    ///
    /// An unrepresentable first report is counted in days past the start's day
    /// of year instead.
    #[must_use]
    pub fn first_report_fractional_day(&self) -> f64 {
        match self.first_report_instant() {
            Some(instant) => fractional_day_of_year(instant),
            None => {
                warn!(
                    start = %self.start,
                    offset = self.offsets[0],
                    "first report is outside the supported date range"
                );
                fractional_day_of_year(self.start) + self.offsets[0] as f64 / SECONDS_PER_DAY
            }
        }
    }

    /// Days elapsed since the first report, one entry per sample.
    #[must_use]
    pub fn days_from_first_report(&self) -> Vec<f64> {
        let first = self.offsets[0];
        self.offsets
            .iter()
            .map(|&offset| (offset - first) as f64 / SECONDS_PER_DAY)
            .collect()
    }

    /// Days between the first and the last report.
    #[must_use]
    pub fn span_days(&self) -> f64 {
        let first = self.offsets[0];
        let last = self.offsets[self.offsets.len() - 1];
        (last - first) as f64 / SECONDS_PER_DAY
    }

    /// Value reported for the instant `days` after the first report.
    ///
    /// Each sample covers the period ending at its offset, so the lookup
    /// returns the first sample at or after the queried instant. Instants
    /// outside the reported span yield `out_of_range_value`.
    #[must_use]
    pub fn value_at_days(&self, days: f64) -> f64 {
        if !days.is_finite() {
            return self.out_of_range_value;
        }

        let first = self.offsets[0] as f64;
        let last = self.offsets[self.offsets.len() - 1] as f64;
        let target = first + days * SECONDS_PER_DAY;
        if target < first - LOOKUP_TOLERANCE_SECS || target > last + LOOKUP_TOLERANCE_SECS {
            return self.out_of_range_value;
        }

        let index = self
            .offsets
            .partition_point(|&offset| (offset as f64) < target - LOOKUP_TOLERANCE_SECS);
        self.values[index.min(self.values.len() - 1)]
    }

    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.sum() / self.values.len() as f64
    }

    /// Population variance from the streaming estimator. `0.0` for one sample.
    #[must_use]
    pub fn variance(&self) -> f64 {
        RunningStats::from_values(&self.values).variance()
    }

    #[must_use]
    pub fn stdev(&self) -> f64 {
        self.variance().sqrt()
    }
}

// Offsets are checked at their extremes; every offset in between is
// representable once both ends are.
fn validate_offsets(start: NaiveDateTime, offsets: &[i64]) -> PlotDataResult<()> {
    let low = offsets.iter().copied().min().unwrap_or(0);
    let high = offsets.iter().copied().max().unwrap_or(0);
    for offset in [low, high] {
        if offset_instant(start, offset).is_none() {
            return Err(PlotDataError::InvalidData(format!(
                "time series offset {offset}s from {start} is outside the supported date range"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::TimeSeries;

    fn new_year_2017() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid start")
    }

    #[test]
    fn lookup_tolerance_absorbs_float_noise() {
        let series = TimeSeries::new(new_year_2017(), vec![3600, 7200], vec![1.0, 2.0]);
        let one_hour = 1.0 / 24.0;
        assert_eq!(series.value_at_days(one_hour * (1.0 + 1e-12)), 2.0);
        assert_eq!(series.value_at_days(one_hour * (1.0 - 1e-12)), 2.0);
    }

    #[test]
    fn empty_inputs_become_one_zero_sample() {
        let series = TimeSeries::new(new_year_2017(), Vec::new(), vec![1.0, 2.0]);
        assert_eq!(series.offsets(), &[0]);
        assert_eq!(series.values(), &[0.0]);
    }
}
