use serde::{Deserialize, Serialize};

use crate::error::{PlotDataError, PlotDataResult};

/// Closed value interval used for data ranges and color-map ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    min_value: f64,
    max_value: f64,
}

impl Interval {
    pub const UNIT: Self = Self {
        min_value: 0.0,
        max_value: 1.0,
    };

    /// Builds an interval from two finite bounds, ordering them if needed.
    pub fn new(min_value: f64, max_value: f64) -> PlotDataResult<Self> {
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(PlotDataError::InvalidData(
                "interval bounds must be finite".to_owned(),
            ));
        }

        Ok(Self {
            min_value: min_value.min(max_value),
            max_value: min_value.max(max_value),
        })
    }

    /// Smallest interval spanning all finite `values`, or `None` when there are none.
    #[must_use]
    pub fn spanning(values: &[f64]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in values.iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }

        (min <= max).then_some(Self {
            min_value: min,
            max_value: max,
        })
    }

    #[must_use]
    pub fn min_value(self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_value - self.min_value
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min_value == self.max_value
    }

    /// Returns `[min, min + 1]` for a degenerate interval, otherwise `self`.
    ///
    /// Keeps `(v - min) / width` well defined for color normalization.
    #[must_use]
    pub fn widened(self) -> Self {
        if self.is_degenerate() {
            Self {
                min_value: self.min_value,
                max_value: self.min_value + 1.0,
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    /// Maps `value` to its fractional position inside the interval (unclamped).
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.min_value) / self.width()
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    #[test]
    fn new_orders_bounds() {
        let interval = Interval::new(5.0, -1.0).expect("finite");
        assert_eq!(interval.min_value(), -1.0);
        assert_eq!(interval.max_value(), 5.0);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let err = Interval::new(f64::NAN, 1.0).expect_err("nan must fail");
        assert!(format!("{err}").contains("finite"));
    }

    #[test]
    fn spanning_skips_non_finite_values() {
        let interval = Interval::spanning(&[f64::NAN, 3.0, -2.0, f64::INFINITY]).expect("span");
        assert_eq!(interval, Interval::new(-2.0, 3.0).expect("finite"));
        assert!(Interval::spanning(&[]).is_none());
    }
}
