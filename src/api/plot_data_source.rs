use crate::core::{ColorMap, ColorMapKind, DataPoint, Interval, Rect, SummaryStats};

/// Read-only view shared by every plot data adapter.
///
/// Renderers use it for axis scaling, legends and statistics panels without
/// knowing whether the data is a series, a grid or plain vectors.
pub trait PlotDataSource {
    /// Data extent as origin plus width/height.
    fn bounding_rect(&self) -> Rect;

    fn units(&self) -> &str;

    /// Smallest plotted value.
    fn min_value(&self) -> f64;

    /// Largest plotted value.
    fn max_value(&self) -> f64;

    fn sum(&self) -> f64;

    fn mean(&self) -> f64;

    fn stdev(&self) -> f64;

    fn summary(&self) -> SummaryStats {
        SummaryStats {
            sum: self.sum(),
            mean: self.mean(),
            stdev: self.stdev(),
        }
    }
}

/// Surface queried per pixel by a flood (heat-map) renderer.
pub trait FloodPlotSource: PlotDataSource {
    /// Value at data coordinates `(x, y)`.
    fn value(&self, x: f64, y: f64) -> f64;

    /// Active color-map interval. Independent of the data min/max.
    fn range(&self) -> Interval;

    /// Overrides the color-map interval; flat intervals are widened to `[min, min + 1]`.
    fn set_color_map_range(&mut self, range: Interval);

    /// Suggested redraw granularity in data coordinates.
    fn pixel_hint(&self) -> Rect;

    /// Color map spanning the active range with `level_count` evenly spaced levels.
    fn color_map(&self, kind: ColorMapKind, level_count: usize) -> ColorMap {
        ColorMap::from_interval(self.range(), level_count, kind)
    }
}

/// Indexed samples drawn by a line renderer.
pub trait LinePlotSource: PlotDataSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample `index` in plot coordinates, or `None` past the end.
    fn sample(&self, index: usize) -> Option<DataPoint>;

    fn samples(&self) -> Vec<DataPoint> {
        (0..self.len()).filter_map(|index| self.sample(index)).collect()
    }
}
