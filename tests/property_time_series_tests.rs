use chrono::{NaiveDate, NaiveDateTime};
use plot_data::core::{RunningStats, TimeSeries};
use proptest::prelude::*;

fn new_year_2017() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid start")
}

fn increasing_offsets(gaps: &[i64]) -> Vec<i64> {
    gaps.iter()
        .scan(0i64, |acc, gap| {
            *acc += gap;
            Some(*acc)
        })
        .collect()
}

proptest! {
    #[test]
    fn statistics_stay_within_value_bounds(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)
    ) {
        let offsets = (1..=values.len() as i64).map(|i| i * 3_600).collect();
        let series = TimeSeries::new(new_year_2017(), offsets, values.clone());

        let tolerance = 1e-6 * (1.0 + series.maximum().abs().max(series.minimum().abs()));
        prop_assert!(series.minimum() <= series.maximum());
        prop_assert!(series.mean() >= series.minimum() - tolerance);
        prop_assert!(series.mean() <= series.maximum() + tolerance);
        prop_assert!(series.variance() >= 0.0);
        prop_assert!((series.stdev() * series.stdev() - series.variance()).abs() <= 1e-6 * (1.0 + series.variance()));
    }

    #[test]
    fn streaming_variance_matches_two_pass(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 2..64)
    ) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let two_pass = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let stats = RunningStats::from_values(&values);
        prop_assert!((stats.variance() - two_pass).abs() <= 1e-7 * (1.0 + two_pass));
        prop_assert!((stats.mean() - mean).abs() <= 1e-9 * (1.0 + mean.abs()));
    }

    #[test]
    fn days_from_first_report_start_at_zero_and_grow(
        gaps in prop::collection::vec(1i64..100_000, 1..48)
    ) {
        let offsets = increasing_offsets(&gaps);
        let values = vec![1.0; offsets.len()];
        let series = TimeSeries::new(new_year_2017(), offsets, values);
        let days = series.days_from_first_report();

        prop_assert_eq!(days[0], 0.0);
        prop_assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!((days[days.len() - 1] - series.span_days()).abs() <= 1e-12);
    }

    #[test]
    fn lookup_at_report_offsets_returns_that_report(
        gaps in prop::collection::vec(1i64..100_000, 1..48),
        seed in 0.0f64..1_000.0
    ) {
        let offsets = increasing_offsets(&gaps);
        let values: Vec<f64> = (0..offsets.len()).map(|i| seed + i as f64).collect();
        let series = TimeSeries::new(new_year_2017(), offsets, values.clone());

        for (i, day) in series.days_from_first_report().into_iter().enumerate() {
            prop_assert_eq!(series.value_at_days(day), values[i]);
        }
    }

    #[test]
    fn truncation_keeps_shorter_length(
        offsets_len in 0usize..32,
        values_len in 0usize..32
    ) {
        let offsets = (0..offsets_len as i64).map(|i| i * 60).collect();
        let values = vec![2.0; values_len];
        let series = TimeSeries::new(new_year_2017(), offsets, values);

        prop_assert_eq!(series.len(), offsets_len.min(values_len).max(1));
        prop_assert_eq!(series.offsets().len(), series.values().len());
    }
}
