use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::linspace;
use crate::core::{Interval, Rect, RunningStats};
use crate::error::{PlotDataError, PlotDataResult};

/// Dense rectangular grid sampled on explicit x/y axes.
///
/// Cells are stored row-major by x then y: `cells[i * y_len + j]` is the value
/// at `(x_axis[i], y_axis[j])`.
///
/// Invariants:
/// - both axes hold at least two finite, strictly monotonic coordinates
///   (increasing or decreasing)
/// - `cells.len() == x_axis.len() * y_axis.len()`
///
/// Deserialization goes through [`Grid2D::new`], so the invariants hold for
/// grids loaded from JSON too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid2D")]
pub struct Grid2D {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
    cells: Vec<f64>,
    value_range: Interval,
}

impl Grid2D {
    /// Builds a grid from row-major (x-major) cells.
    pub fn new(x_axis: Vec<f64>, y_axis: Vec<f64>, cells: Vec<f64>) -> PlotDataResult<Self> {
        let (m, n) = (x_axis.len(), y_axis.len());
        if m <= 1 || n <= 1 || cells.len() != m * n {
            return Err(dimension_error(m, n, cells.len()));
        }

        validate_axis(&x_axis, "x")?;
        validate_axis(&y_axis, "y")?;

        let value_range = Interval::spanning(&cells).map_or_else(
            || {
                warn!("grid holds no finite cells, using unit value range");
                Interval::UNIT
            },
            Interval::widened,
        );

        debug!(
            x_len = m,
            y_len = n,
            min = value_range.min_value(),
            max = value_range.max_value(),
            "built grid"
        );

        Ok(Self {
            x_axis,
            y_axis,
            cells,
            value_range,
        })
    }

    /// Builds a grid from one row of `y_axis.len()` values per x coordinate.
    pub fn from_rows(
        x_axis: Vec<f64>,
        y_axis: Vec<f64>,
        rows: Vec<Vec<f64>>,
    ) -> PlotDataResult<Self> {
        let n = y_axis.len();
        if rows.len() != x_axis.len() || rows.iter().any(|row| row.len() != n) {
            return Err(dimension_error(
                x_axis.len(),
                n,
                rows.iter().map(Vec::len).sum(),
            ));
        }

        Self::new(x_axis, y_axis, rows.into_iter().flatten().collect())
    }

    /// Builds a grid from a flat buffer where x varies fastest:
    /// `values[j * x_len + i]` is the value at `(x_axis[i], y_axis[j])`.
    pub fn from_x_fastest(
        x_axis: Vec<f64>,
        y_axis: Vec<f64>,
        values: &[f64],
    ) -> PlotDataResult<Self> {
        let (m, n) = (x_axis.len(), y_axis.len());
        if values.len() != m * n {
            return Err(dimension_error(m, n, values.len()));
        }

        let mut cells = Vec::with_capacity(values.len());
        for i in 0..m {
            for j in 0..n {
                cells.push(values[j * m + i]);
            }
        }
        Self::new(x_axis, y_axis, cells)
    }

    /// Builds a grid whose axes are the cell indices `0..x_len` and `0..y_len`.
    pub fn with_index_axes(x_len: usize, y_len: usize, cells: Vec<f64>) -> PlotDataResult<Self> {
        let x_axis = linspace(0.0, x_len.saturating_sub(1) as f64, x_len);
        let y_axis = linspace(0.0, y_len.saturating_sub(1) as f64, y_len);
        Self::new(x_axis, y_axis, cells)
    }

    #[must_use]
    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &[f64] {
        &self.y_axis
    }

    #[must_use]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    #[must_use]
    pub fn x_len(&self) -> usize {
        self.x_axis.len()
    }

    #[must_use]
    pub fn y_len(&self) -> usize {
        self.y_axis.len()
    }

    /// Cell at axis indices `(i, j)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.x_len() || j >= self.y_len() {
            return None;
        }
        Some(self.cells[i * self.y_len() + j])
    }

    /// Unchecked variant of [`Grid2D::cell`] for indices already clamped to the axes.
    pub(crate) fn cell_at(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.y_len() + j]
    }

    /// Min/max over the cells, widened to `[min, min + 1]` when flat.
    #[must_use]
    pub fn value_range(&self) -> Interval {
        self.value_range
    }

    /// `(min, max)` of the x axis, whichever way it runs.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        axis_extent(&self.x_axis)
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        axis_extent(&self.y_axis)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let (min_x, max_x) = self.x_range();
        let (min_y, max_y) = self.y_range();
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Suggested redraw cell anchored at the grid origin: each axis extent over
    /// twice its point count.
    #[must_use]
    pub fn pixel_hint(&self) -> Rect {
        let (min_x, max_x) = self.x_range();
        let (min_y, max_y) = self.y_range();
        let dx = (max_x - min_x) / (self.x_len() as f64 * 2.0);
        let dy = (max_y - min_y) / (self.y_len() as f64 * 2.0);
        Rect::new(min_x, min_y, dx, dy)
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.sum() / self.cells.len() as f64
    }

    #[must_use]
    pub fn stdev(&self) -> f64 {
        RunningStats::from_values(&self.cells).stdev()
    }
}

/// Wire shape of [`Grid2D`]; `value_range` is recomputed on load.
#[derive(Deserialize)]
struct RawGrid2D {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
    cells: Vec<f64>,
}

impl TryFrom<RawGrid2D> for Grid2D {
    type Error = PlotDataError;

    fn try_from(raw: RawGrid2D) -> Result<Self, Self::Error> {
        Self::new(raw.x_axis, raw.y_axis, raw.cells)
    }
}

fn axis_extent(axis: &[f64]) -> (f64, f64) {
    let first = axis[0];
    let last = axis[axis.len() - 1];
    (first.min(last), first.max(last))
}

fn dimension_error(x_len: usize, y_len: usize, cells_len: usize) -> PlotDataError {
    PlotDataError::InvalidDimensions(format!(
        "grid x axis={x_len}, y axis={y_len}, cells={cells_len}"
    ))
}

fn validate_axis(axis: &[f64], name: &str) -> PlotDataResult<()> {
    if axis.iter().any(|value| !value.is_finite()) {
        return Err(PlotDataError::InvalidData(format!(
            "{name} axis values must be finite"
        )));
    }
    let increasing = axis.windows(2).all(|pair| pair[0] < pair[1]);
    let decreasing = axis.windows(2).all(|pair| pair[0] > pair[1]);
    if !increasing && !decreasing {
        return Err(PlotDataError::InvalidData(format!(
            "{name} axis must be strictly monotonic"
        )));
    }
    Ok(())
}
