//! plot-data-rs: numeric core behind line and flood (heat-map) plots of
//! simulation report data.
//!
//! The crate turns report time series and regular grids into the queries a
//! renderer needs: indexed samples, `value(x, y)` lookups with configurable
//! interpolation, value ranges, summary statistics, and discrete color maps.
//! Rendering itself is left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{
    FloodPlotConfig, FloodPlotSource, GridFloodPlotData, LinePlotSource, PlotDataSource,
    PlotSummary, TimeSeriesFloodPlotData, TimeSeriesLinePlotData, VectorLinePlotData,
};
pub use error::{PlotDataError, PlotDataResult};
