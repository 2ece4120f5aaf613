use serde::{Deserialize, Serialize};

use crate::core::Grid2D;

/// Rule for producing a value between known grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpMethod {
    /// Bilinear interpolation inside the bracketing cell.
    Linear,
    /// Closest axis point on each axis, ties toward the lower index.
    #[default]
    Nearest,
    /// Closest axis point at or below the query on each axis (step function).
    HoldLast,
    /// Closest axis point at or above the query on each axis (step function).
    HoldNext,
}

/// Rule for producing a value outside the grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExtrapMethod {
    /// Clamp out-of-range coordinates to the nearest axis endpoint.
    #[default]
    Nearest,
}

/// Evaluates `grid` at `(x, y)`.
///
/// The extrapolation rule is applied to each coordinate first, so the
/// interpolation rule only ever sees coordinates inside the axis range.
/// Queries landing exactly on axis points return the stored cell for every
/// interpolation rule. NaN coordinates yield NaN.
///
/// Axes may run in either direction. `HoldLast` and `HoldNext` are defined on
/// coordinates: they pick the axis point at or below, respectively at or
/// above, the query, not the neighbour in storage order.
#[must_use]
pub fn interpolate(
    grid: &Grid2D,
    x: f64,
    y: f64,
    interp: InterpMethod,
    extrap: ExtrapMethod,
) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }

    let (x, y) = match extrap {
        ExtrapMethod::Nearest => (
            clamp_to_axis(grid.x_axis(), x),
            clamp_to_axis(grid.y_axis(), y),
        ),
    };

    match interp {
        InterpMethod::Nearest => {
            let i = nearest_index(grid.x_axis(), x);
            let j = nearest_index(grid.y_axis(), y);
            grid.cell_at(i, j)
        }
        InterpMethod::HoldLast => {
            let i = hold_last_index(grid.x_axis(), x);
            let j = hold_last_index(grid.y_axis(), y);
            grid.cell_at(i, j)
        }
        InterpMethod::HoldNext => {
            let i = hold_next_index(grid.x_axis(), x);
            let j = hold_next_index(grid.y_axis(), y);
            grid.cell_at(i, j)
        }
        InterpMethod::Linear => {
            let (i, tx) = bracket(grid.x_axis(), x);
            let (j, ty) = bracket(grid.y_axis(), y);
            let low = lerp(grid.cell_at(i, j), grid.cell_at(i + 1, j), tx);
            let high = lerp(grid.cell_at(i, j + 1), grid.cell_at(i + 1, j + 1), tx);
            lerp(low, high, ty)
        }
    }
}

fn is_descending(axis: &[f64]) -> bool {
    axis[axis.len() - 1] < axis[0]
}

fn clamp_to_axis(axis: &[f64], value: f64) -> f64 {
    let first = axis[0];
    let last = axis[axis.len() - 1];
    value.clamp(first.min(last), first.max(last))
}

/// Index `i` with `value` between `axis[i]` and `axis[i + 1]` and the
/// fractional position of `value` from `axis[i]` toward `axis[i + 1]`.
/// `value` must lie on the axis range.
fn bracket(axis: &[f64], value: f64) -> (usize, f64) {
    let upper = if is_descending(axis) {
        axis.partition_point(|&point| point >= value)
    } else {
        axis.partition_point(|&point| point <= value)
    };
    let i = upper.saturating_sub(1).min(axis.len() - 2);
    let t = (value - axis[i]) / (axis[i + 1] - axis[i]);
    (i, t)
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    let (i, _) = bracket(axis, value);
    if (value - axis[i]).abs() <= (axis[i + 1] - value).abs() {
        i
    } else {
        i + 1
    }
}

fn hold_last_index(axis: &[f64], value: f64) -> usize {
    if is_descending(axis) {
        axis.partition_point(|&point| point > value).min(axis.len() - 1)
    } else {
        axis.partition_point(|&point| point <= value).saturating_sub(1)
    }
}

fn hold_next_index(axis: &[f64], value: f64) -> usize {
    if is_descending(axis) {
        axis.partition_point(|&point| point >= value).saturating_sub(1)
    } else {
        axis.partition_point(|&point| point < value).min(axis.len() - 1)
    }
}

// Endpoints short-circuit so exact axis hits never mix in a neighbour cell.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a * (1.0 - t) + b * t
    }
}

#[cfg(test)]
mod tests {
    use super::{bracket, hold_last_index, hold_next_index, nearest_index};

    const AXIS: [f64; 4] = [0.0, 1.0, 3.0, 7.0];

    #[test]
    fn bracket_clamps_last_point_into_final_segment() {
        assert_eq!(bracket(&AXIS, 0.0), (0, 0.0));
        assert_eq!(bracket(&AXIS, 2.0), (1, 0.5));
        assert_eq!(bracket(&AXIS, 7.0), (2, 1.0));
    }

    #[test]
    fn nearest_breaks_ties_toward_lower_index() {
        assert_eq!(nearest_index(&AXIS, 2.0), 1);
        assert_eq!(nearest_index(&AXIS, 2.5), 2);
        assert_eq!(nearest_index(&AXIS, 0.4), 0);
    }

    #[test]
    fn descending_axes_bracket_in_storage_order() {
        const DESC: [f64; 4] = [7.0, 3.0, 1.0, 0.0];
        assert_eq!(bracket(&DESC, 7.0), (0, 0.0));
        assert_eq!(bracket(&DESC, 2.0), (1, 0.5));
        assert_eq!(bracket(&DESC, 0.0), (2, 1.0));
        assert_eq!(nearest_index(&DESC, 2.0), 1);
        assert_eq!(nearest_index(&DESC, 1.5), 2);
        assert_eq!(hold_last_index(&DESC, 2.0), 2);
        assert_eq!(hold_next_index(&DESC, 2.0), 1);
        assert_eq!(hold_last_index(&DESC, 3.0), 1);
        assert_eq!(hold_next_index(&DESC, 3.0), 1);
        assert_eq!(hold_last_index(&DESC, 0.0), 3);
        assert_eq!(hold_next_index(&DESC, 7.0), 0);
    }

    #[test]
    fn hold_indices_bracket_between_points() {
        assert_eq!(hold_last_index(&AXIS, 2.0), 1);
        assert_eq!(hold_next_index(&AXIS, 2.0), 2);
        assert_eq!(hold_last_index(&AXIS, 3.0), 2);
        assert_eq!(hold_next_index(&AXIS, 3.0), 2);
        assert_eq!(hold_next_index(&AXIS, 7.0), 3);
    }
}
