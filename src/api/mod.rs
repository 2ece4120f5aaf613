//! Renderer-facing adapters over the core data types.

mod grid_flood;
mod line_plot;
mod plot_config;
mod plot_data_source;
mod summary;
mod time_series_flood;

pub use grid_flood::GridFloodPlotData;
pub use line_plot::{TimeSeriesLinePlotData, VectorLinePlotData};
pub use plot_config::FloodPlotConfig;
pub use plot_data_source::{FloodPlotSource, LinePlotSource, PlotDataSource};
pub use summary::{PLOT_SUMMARY_JSON_SCHEMA_V1, PlotSummary, PlotSummaryJsonContractV1};
pub use time_series_flood::TimeSeriesFloodPlotData;
