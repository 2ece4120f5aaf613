use tracing::debug;

use crate::core::{DataPoint, Interval, Rect, RunningStats, TimeSeries};
use crate::error::{PlotDataError, PlotDataResult};

use super::{LinePlotSource, PlotDataSource};

/// Line samples for a time series, with x in fractional days of year.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesLinePlotData {
    series: TimeSeries,
    days: Vec<f64>,
    start_fractional_day: f64,
    frac_days_offset: f64,
}

impl TimeSeriesLinePlotData {
    #[must_use]
    pub fn new(series: TimeSeries) -> Self {
        let days = series.days_from_first_report();
        let start_fractional_day = series.first_report_fractional_day();
        debug!(
            samples = days.len(),
            start_fractional_day,
            "built time series line data"
        );
        Self {
            series,
            days,
            start_fractional_day,
            frac_days_offset: 0.0,
        }
    }

    /// Shifts every sample along x, e.g. to align series reported at
    /// different cadences.
    #[must_use]
    pub fn with_frac_days_offset(mut self, frac_days_offset: f64) -> Self {
        self.frac_days_offset = frac_days_offset;
        self
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn frac_days_offset(&self) -> f64 {
        self.frac_days_offset
    }

    fn x_at(&self, day: f64) -> f64 {
        day + self.frac_days_offset + self.start_fractional_day
    }
}

impl PlotDataSource for TimeSeriesLinePlotData {
    fn bounding_rect(&self) -> Rect {
        let first = self.days.first().copied().unwrap_or(0.0);
        let last = self.days.last().copied().unwrap_or(first);
        let min_value = self.min_value();
        Rect::new(
            self.x_at(first),
            min_value,
            last - first,
            self.max_value() - min_value,
        )
    }

    fn units(&self) -> &str {
        self.series.units()
    }

    fn min_value(&self) -> f64 {
        self.series.minimum()
    }

    fn max_value(&self) -> f64 {
        self.series.maximum()
    }

    fn sum(&self) -> f64 {
        self.series.sum()
    }

    fn mean(&self) -> f64 {
        self.series.mean()
    }

    fn stdev(&self) -> f64 {
        self.series.stdev()
    }
}

impl LinePlotSource for TimeSeriesLinePlotData {
    fn len(&self) -> usize {
        self.days.len()
    }

    fn sample(&self, index: usize) -> Option<DataPoint> {
        let day = *self.days.get(index)?;
        let value = *self.series.values().get(index)?;
        Some(DataPoint::new(self.x_at(day), value))
    }
}

/// Line samples from paired x/y vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLinePlotData {
    x: Vec<f64>,
    y: Vec<f64>,
    x_range: Interval,
    y_range: Interval,
    units: String,
}

impl VectorLinePlotData {
    /// Requires equal lengths of at least two samples.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> PlotDataResult<Self> {
        if x.len() != y.len() || x.len() <= 1 {
            return Err(PlotDataError::InvalidDimensions(format!(
                "line data x={}, y={}",
                x.len(),
                y.len()
            )));
        }

        let x_range = Interval::spanning(&x).ok_or_else(|| {
            PlotDataError::InvalidData("line data x values must contain a finite value".to_owned())
        })?;
        let y_range = Interval::spanning(&y).ok_or_else(|| {
            PlotDataError::InvalidData("line data y values must contain a finite value".to_owned())
        })?;

        Ok(Self {
            x,
            y,
            x_range,
            y_range,
            units: String::new(),
        })
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

impl PlotDataSource for VectorLinePlotData {
    fn bounding_rect(&self) -> Rect {
        Rect::new(
            self.x_range.min_value(),
            self.y_range.min_value(),
            self.x_range.width(),
            self.y_range.width(),
        )
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn min_value(&self) -> f64 {
        self.y_range.min_value()
    }

    fn max_value(&self) -> f64 {
        self.y_range.max_value()
    }

    fn sum(&self) -> f64 {
        self.y.iter().sum()
    }

    fn mean(&self) -> f64 {
        RunningStats::from_values(&self.y).mean()
    }

    fn stdev(&self) -> f64 {
        RunningStats::from_values(&self.y).stdev()
    }
}

impl LinePlotSource for VectorLinePlotData {
    fn len(&self) -> usize {
        self.x.len()
    }

    fn sample(&self, index: usize) -> Option<DataPoint> {
        Some(DataPoint::new(*self.x.get(index)?, *self.y.get(index)?))
    }
}
