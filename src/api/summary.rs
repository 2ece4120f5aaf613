use serde::{Deserialize, Serialize};

use crate::core::stats::nan_from_null;
use crate::core::{Rect, SummaryStats};
use crate::error::{PlotDataError, PlotDataResult};

use super::PlotDataSource;

pub const PLOT_SUMMARY_JSON_SCHEMA_V1: u32 = 1;

/// Point-in-time description of a plot data source: extent, value range and
/// statistics. Used for legends, statistics panels and regression snapshots.
///
/// NaN figures (e.g. statistics over cells holding NaN) are written as `null`
/// and parsed back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSummary {
    pub units: String,
    pub bounding_rect: Rect,
    #[serde(deserialize_with = "nan_from_null")]
    pub min_value: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub max_value: f64,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSummaryJsonContractV1 {
    pub schema_version: u32,
    pub summary: PlotSummary,
}

impl PlotSummary {
    #[must_use]
    pub fn from_source<S: PlotDataSource + ?Sized>(source: &S) -> Self {
        Self {
            units: source.units().to_owned(),
            bounding_rect: source.bounding_rect(),
            min_value: source.min_value(),
            max_value: source.max_value(),
            stats: source.summary(),
        }
    }

    pub fn to_json_pretty(&self) -> PlotDataResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotDataError::InvalidData(format!("failed to serialize summary: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotDataResult<String> {
        let payload = PlotSummaryJsonContractV1 {
            schema_version: PLOT_SUMMARY_JSON_SCHEMA_V1,
            summary: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotDataError::InvalidData(format!("failed to serialize summary contract v1: {e}"))
        })
    }

    /// Accepts either a bare summary or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> PlotDataResult<Self> {
        if let Ok(summary) = serde_json::from_str::<PlotSummary>(input) {
            return Ok(summary);
        }
        let payload: PlotSummaryJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotDataError::InvalidData(format!("failed to parse summary json payload: {e}"))
        })?;
        if payload.schema_version != PLOT_SUMMARY_JSON_SCHEMA_V1 {
            return Err(PlotDataError::InvalidData(format!(
                "unsupported summary schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.summary)
    }
}
