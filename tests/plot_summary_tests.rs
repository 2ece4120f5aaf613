use plot_data::api::{PLOT_SUMMARY_JSON_SCHEMA_V1, PlotSummaryJsonContractV1};
use plot_data::core::Grid2D;
use plot_data::{GridFloodPlotData, PlotSummary, VectorLinePlotData};

fn grid_flood() -> GridFloodPlotData {
    let grid = Grid2D::with_index_axes(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("valid grid");
    GridFloodPlotData::new(grid).with_units("W")
}

#[test]
fn summary_captures_source_metadata() {
    let summary = PlotSummary::from_source(&grid_flood());

    assert_eq!(summary.units, "W");
    assert_eq!(summary.min_value, 1.0);
    assert_eq!(summary.max_value, 4.0);
    assert_eq!(summary.stats.sum, 10.0);
    assert!((summary.stats.mean - 2.5).abs() <= 1e-12);
    assert!((summary.stats.stdev - 1.25f64.sqrt()).abs() <= 1e-12);
    assert_eq!(summary.bounding_rect.width, 1.0);
}

#[test]
fn summary_works_through_trait_objects() {
    let line = VectorLinePlotData::new(vec![0.0, 1.0], vec![5.0, 7.0]).expect("valid line");
    let sources: Vec<&dyn plot_data::PlotDataSource> = vec![&line];

    let summary = PlotSummary::from_source(sources[0]);
    assert_eq!(summary.stats.sum, 12.0);
}

#[test]
fn summary_json_contract_round_trips() {
    let summary = PlotSummary::from_source(&grid_flood());

    let json = summary.to_json_contract_v1_pretty().expect("serialize contract");
    let payload: PlotSummaryJsonContractV1 = serde_json::from_str(&json).expect("contract json");
    assert_eq!(payload.schema_version, PLOT_SUMMARY_JSON_SCHEMA_V1);

    let parsed = PlotSummary::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, summary);

    let bare = summary.to_json_pretty().expect("serialize bare");
    let parsed = PlotSummary::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, summary);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let summary = PlotSummary::from_source(&grid_flood());
    let payload = PlotSummaryJsonContractV1 {
        schema_version: 99,
        summary,
    };
    let json = serde_json::to_string(&payload).expect("serialize payload");

    let err = PlotSummary::from_json_compat_str(&json).expect_err("unknown schema");
    assert!(format!("{err}").contains("unsupported summary schema version"));
}

#[test]
fn nan_statistics_survive_json_round_trip() {
    let grid = Grid2D::with_index_axes(2, 2, vec![1.0, f64::NAN, 3.0, 4.0]).expect("valid grid");
    let summary = PlotSummary::from_source(&GridFloodPlotData::new(grid));
    assert!(summary.stats.sum.is_nan());

    let json = summary.to_json_contract_v1_pretty().expect("serialize contract");
    assert!(json.contains("null"));

    let parsed = PlotSummary::from_json_compat_str(&json).expect("parse contract");
    assert!(parsed.stats.sum.is_nan());
    assert!(parsed.stats.mean.is_nan());
    assert_eq!(parsed.min_value, summary.min_value);
    assert_eq!(parsed.max_value, summary.max_value);
    assert_eq!(parsed.bounding_rect, summary.bounding_rect);
    assert_eq!(parsed.units, summary.units);
}

#[test]
fn null_summary_figures_parse_as_nan() {
    let json = r#"{
        "units": "",
        "bounding_rect": { "x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0 },
        "min_value": null,
        "max_value": null,
        "stats": { "sum": null, "mean": 2.0, "stdev": null }
    }"#;

    let parsed = PlotSummary::from_json_compat_str(json).expect("parse bare summary");
    assert!(parsed.min_value.is_nan());
    assert!(parsed.max_value.is_nan());
    assert!(parsed.stats.sum.is_nan());
    assert_eq!(parsed.stats.mean, 2.0);
    assert!(parsed.stats.stdev.is_nan());
}
