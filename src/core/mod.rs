pub mod color_map;
pub mod grid;
pub mod interpolation;
pub mod interval;
pub mod primitives;
pub mod report;
pub mod stats;
pub mod time_series;
pub mod types;

pub use color_map::{ColorMap, ColorMapKind, ColorStop, Rgb};
pub use grid::Grid2D;
pub use interpolation::{ExtrapMethod, InterpMethod, interpolate};
pub use interval::Interval;
pub use report::{InMemoryReportSource, ReportDataSource, ReportVariable, ReportingFrequency};
pub use stats::{RunningStats, SummaryStats};
pub use time_series::TimeSeries;
pub use types::{DataPoint, Rect};
