use tracing::{debug, warn};

use crate::core::{Interval, Rect, TimeSeries};
use crate::error::PlotDataResult;

use super::{FloodPlotConfig, FloodPlotSource, PlotDataSource};

const HOURS_PER_DAY: f64 = 24.0;

/// Day-of-year versus hour-of-day surface over a single time series.
///
/// `x` spans calendar days (day of year of the first report up to the day
/// containing the last report), `y` spans hours `0..=24`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFloodPlotData {
    series: TimeSeries,
    min_value: f64,
    max_value: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    start_fractional_day: f64,
    color_map_range: Interval,
}

impl TimeSeriesFloodPlotData {
    /// Wraps `series`, mapping colors over the min/max of its finite values.
    #[must_use]
    pub fn new(series: TimeSeries) -> Self {
        let data_range = Interval::spanning(series.values()).unwrap_or_else(|| {
            warn!("time series holds no finite values, using unit color range");
            Interval::UNIT
        });
        Self::with_color_map_range(series, data_range)
    }

    #[must_use]
    pub fn with_color_map_range(series: TimeSeries, color_map_range: Interval) -> Self {
        let start_fractional_day = series.first_report_fractional_day();
        let min_x = start_fractional_day.floor();
        let max_x = (series.span_days() + start_fractional_day).ceil();

        debug!(
            samples = series.len(),
            min_x,
            max_x,
            "built time series flood data"
        );

        Self {
            min_value: series.minimum(),
            max_value: series.maximum(),
            min_x,
            max_x,
            min_y: 0.0,
            max_y: HOURS_PER_DAY,
            start_fractional_day,
            color_map_range: color_map_range.widened(),
            series,
        }
    }

    /// Applies the color-map range from `config`. The interpolation rule does
    /// not apply: every cell reads one report sample.
    pub fn with_config(series: TimeSeries, config: &FloodPlotConfig) -> PlotDataResult<Self> {
        let config = config.validated()?;
        Ok(match config.color_map_range {
            Some(range) => Self::with_color_map_range(series, range),
            None => Self::new(series),
        })
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Fractional day of year at the first report.
    #[must_use]
    pub fn start_fractional_day(&self) -> f64 {
        self.start_fractional_day
    }

    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }
}

impl PlotDataSource for TimeSeriesFloodPlotData {
    fn bounding_rect(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }

    fn units(&self) -> &str {
        self.series.units()
    }

    fn min_value(&self) -> f64 {
        self.min_value
    }

    fn max_value(&self) -> f64 {
        self.max_value
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

impl FloodPlotSource for TimeSeriesFloodPlotData {
    /// `fractional_day` is floored: each column is one calendar day and
    /// `hour_of_day` selects the instant within it.
    fn value(&self, fractional_day: f64, hour_of_day: f64) -> f64 {
        let day = fractional_day.floor() + hour_of_day / HOURS_PER_DAY;
        self.series.value_at_days(day - self.start_fractional_day)
    }

    fn range(&self) -> Interval {
        self.color_map_range
    }

    fn set_color_map_range(&mut self, range: Interval) {
        self.color_map_range = range.widened();
    }

    /// One day wide, one report interval tall (one hour when unknown).
    fn pixel_hint(&self) -> Rect {
        let dy = self
            .series
            .interval()
            .map_or(1.0, |secs| secs as f64 / 3_600.0);
        Rect::new(self.min_x, self.min_y, 1.0, dy)
    }
}
