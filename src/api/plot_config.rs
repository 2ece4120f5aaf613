use serde::{Deserialize, Serialize};

use crate::core::{ColorMapKind, InterpMethod, Interval};
use crate::error::{PlotDataError, PlotDataResult};

/// Serializable flood plot setup.
///
/// Host applications persist this alongside the report selection so a plot
/// can be rebuilt with the same palette and interpolation rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodPlotConfig {
    #[serde(default)]
    pub interp_method: InterpMethod,
    #[serde(default)]
    pub color_map_kind: ColorMapKind,
    #[serde(default = "default_color_map_levels")]
    pub color_map_levels: usize,
    /// Fixed color-map interval; the data range is used when absent.
    #[serde(default)]
    pub color_map_range: Option<Interval>,
}

impl Default for FloodPlotConfig {
    fn default() -> Self {
        Self {
            interp_method: InterpMethod::default(),
            color_map_kind: ColorMapKind::default(),
            color_map_levels: default_color_map_levels(),
            color_map_range: None,
        }
    }
}

impl FloodPlotConfig {
    #[must_use]
    pub fn with_interp_method(mut self, interp_method: InterpMethod) -> Self {
        self.interp_method = interp_method;
        self
    }

    #[must_use]
    pub fn with_color_map_kind(mut self, kind: ColorMapKind) -> Self {
        self.color_map_kind = kind;
        self
    }

    #[must_use]
    pub fn with_color_map_levels(mut self, levels: usize) -> Self {
        self.color_map_levels = levels;
        self
    }

    #[must_use]
    pub fn with_color_map_range(mut self, range: Interval) -> Self {
        self.color_map_range = Some(range);
        self
    }

    /// Checks the level count, then reorders and widens the color-map range.
    pub fn validated(self) -> PlotDataResult<Self> {
        if self.color_map_levels < 2 {
            return Err(PlotDataError::InvalidData(format!(
                "color map levels must be >= 2, got {}",
                self.color_map_levels
            )));
        }
        let color_map_range = self
            .color_map_range
            .map(|range| Interval::new(range.min_value(), range.max_value()))
            .transpose()?
            .map(Interval::widened);
        Ok(Self {
            color_map_range,
            ..self
        })
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> PlotDataResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| PlotDataError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> PlotDataResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotDataError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validated()
    }
}

fn default_color_map_levels() -> usize {
    64
}
