use crate::core::{ExtrapMethod, Grid2D, InterpMethod, Interval, Rect, interpolate};
use crate::error::PlotDataResult;

use super::{FloodPlotConfig, FloodPlotSource, PlotDataSource};

/// Flood surface backed by a regular grid.
///
/// Queries between grid points follow `interp_method`; queries outside the
/// grid are clamped to the nearest edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFloodPlotData {
    grid: Grid2D,
    interp_method: InterpMethod,
    color_map_range: Interval,
    units: String,
}

impl GridFloodPlotData {
    #[must_use]
    pub fn new(grid: Grid2D) -> Self {
        let color_map_range = grid.value_range();
        Self {
            grid,
            interp_method: InterpMethod::default(),
            color_map_range,
            units: String::new(),
        }
    }

    /// Wraps `grid` with the interpolation rule and optional range from `config`.
    pub fn with_config(grid: Grid2D, config: &FloodPlotConfig) -> PlotDataResult<Self> {
        let config = config.validated()?;
        let mut data = Self::new(grid).with_interp_method(config.interp_method);
        if let Some(range) = config.color_map_range {
            data.set_color_map_range(range);
        }
        Ok(data)
    }

    #[must_use]
    pub fn with_interp_method(mut self, interp_method: InterpMethod) -> Self {
        self.interp_method = interp_method;
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    #[must_use]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    #[must_use]
    pub fn interp_method(&self) -> InterpMethod {
        self.interp_method
    }

    pub fn set_interp_method(&mut self, interp_method: InterpMethod) {
        self.interp_method = interp_method;
    }
}

impl PlotDataSource for GridFloodPlotData {
    fn bounding_rect(&self) -> Rect {
        self.grid.bounding_box()
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn min_value(&self) -> f64 {
        self.grid.value_range().min_value()
    }

    // Widened along with the range when every cell holds the same value.
    fn max_value(&self) -> f64 {
        self.grid.value_range().max_value()
    }

    fn sum(&self) -> f64 {
        self.grid.sum()
    }

    fn mean(&self) -> f64 {
        self.grid.mean()
    }

    fn stdev(&self) -> f64 {
        self.grid.stdev()
    }
}

impl FloodPlotSource for GridFloodPlotData {
    fn value(&self, x: f64, y: f64) -> f64 {
        interpolate(&self.grid, x, y, self.interp_method, ExtrapMethod::Nearest)
    }

    fn range(&self) -> Interval {
        self.color_map_range
    }

    fn set_color_map_range(&mut self, range: Interval) {
        self.color_map_range = range.widened();
    }

    fn pixel_hint(&self) -> Rect {
        self.grid.pixel_hint()
    }
}
