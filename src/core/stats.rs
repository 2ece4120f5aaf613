use serde::{Deserialize, Deserializer, Serialize};

/// Streaming mean/variance estimator (Welford).
///
/// Each `push` applies `delta = x - m; m += delta / k; s += delta * (x - m)`
/// where `k` is the updated sample count. Variance uses the population
/// divisor `n`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let mut stats = Self::new();
        for &value in values {
            stats.push(value);
        }
        stats
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Running mean. `0.0` before the first sample.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance. `0.0` for fewer than two samples.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / self.count as f64
    }

    #[must_use]
    pub fn stdev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Aggregate figures shown next to a plot.
///
/// Non-finite figures serialize as JSON `null` and read back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(deserialize_with = "nan_from_null")]
    pub sum: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub mean: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub stdev: f64,
}

/// Reads `null` as NaN, the value `serde_json` writes for any non-finite float.
pub(crate) fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::RunningStats;

    #[test]
    fn single_sample_has_zero_variance() {
        let stats = RunningStats::from_values(&[42.0]);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.mean(), 42.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.stdev(), 0.0);
    }

    #[test]
    fn matches_seeded_recurrence() {
        let values = [3.5, -1.25, 8.0, 8.0, 0.125, 17.0];

        let mut m = values[0];
        let mut s = 0.0;
        for (k, &x) in values.iter().enumerate().skip(1) {
            let delta = x - m;
            m += delta / (k + 1) as f64;
            s += delta * (x - m);
        }

        let stats = RunningStats::from_values(&values);
        assert_eq!(stats.mean(), m);
        assert_eq!(stats.variance(), s / values.len() as f64);
    }

    #[test]
    fn large_offset_does_not_lose_precision() {
        let base = 1.0e9;
        let stats = RunningStats::from_values(&[base + 4.0, base + 7.0, base + 13.0, base + 16.0]);
        assert!((stats.variance() - 22.5).abs() <= 1e-6);
    }
}
