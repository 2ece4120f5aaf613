use thiserror::Error;

pub type PlotDataResult<T> = Result<T, PlotDataError>;

#[derive(Debug, Error)]
pub enum PlotDataError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown report variable: {0}")]
    UnknownReportVariable(String),
}
