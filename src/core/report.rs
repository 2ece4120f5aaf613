use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TimeSeries;
use crate::error::{PlotDataError, PlotDataResult};

/// Reporting cadence of a simulation output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportingFrequency {
    /// HVAC system timestep.
    Detailed,
    /// Zone timestep.
    Timestep,
    Hourly,
    Daily,
    Monthly,
    RunPeriod,
}

impl ReportingFrequency {
    /// Fixed spacing between reports, when the cadence has one.
    ///
    /// Timestep cadences depend on the simulation setup and monthly reports
    /// vary in length, so neither has a fixed interval.
    #[must_use]
    pub fn fixed_interval_secs(self) -> Option<i64> {
        match self {
            Self::Hourly => Some(3_600),
            Self::Daily => Some(86_400),
            Self::Detailed | Self::Timestep | Self::Monthly | Self::RunPeriod => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detailed => "HVAC System Timestep",
            Self::Timestep => "Zone Timestep",
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::RunPeriod => "Run Period",
        }
    }
}

impl fmt::Display for ReportingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingFrequency {
    type Err = PlotDataError;

    /// Parses report-dictionary spellings, ignoring case and spaces.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "detailed" | "hvacsystemtimestep" => Ok(Self::Detailed),
            "timestep" | "zonetimestep" => Ok(Self::Timestep),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "runperiod" => Ok(Self::RunPeriod),
            _ => Err(PlotDataError::InvalidData(format!(
                "unknown reporting frequency: {input}"
            ))),
        }
    }
}

/// Dictionary entry describing one reported variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportVariable {
    pub name: String,
    pub key_value: String,
    pub frequency: ReportingFrequency,
    pub units: String,
}

impl ReportVariable {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        key_value: impl Into<String>,
        frequency: ReportingFrequency,
        units: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key_value: key_value.into(),
            frequency,
            units: units.into(),
        }
    }

    fn lookup_key(&self) -> (String, String) {
        lookup_key(&self.name, &self.key_value)
    }
}

/// Supplier of report time series, typically backed by a simulation results database.
pub trait ReportDataSource {
    /// All variables available from the source, in a stable order.
    fn report_variables(&self) -> Vec<ReportVariable>;

    /// Series for the variable `name` reported for `key_value`.
    fn time_series(&self, name: &str, key_value: &str) -> PlotDataResult<TimeSeries>;
}

/// Insertion-ordered, in-memory report source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportSource {
    entries: IndexMap<(String, String), (ReportVariable, TimeSeries)>,
}

impl InMemoryReportSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a variable. The stored series takes the
    /// variable's units.
    pub fn insert(&mut self, variable: ReportVariable, series: TimeSeries) {
        let series = series.with_units(variable.units.clone());
        debug!(
            name = %variable.name,
            key_value = %variable.key_value,
            frequency = %variable.frequency,
            samples = series.len(),
            "register report variable"
        );
        self.entries.insert(variable.lookup_key(), (variable, series));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReportDataSource for InMemoryReportSource {
    fn report_variables(&self) -> Vec<ReportVariable> {
        self.entries
            .values()
            .map(|(variable, _)| variable.clone())
            .collect()
    }

    fn time_series(&self, name: &str, key_value: &str) -> PlotDataResult<TimeSeries> {
        self.entries
            .get(&lookup_key(name, key_value))
            .map(|(_, series)| series.clone())
            .ok_or_else(|| PlotDataError::UnknownReportVariable(format!("{name} [{key_value}]")))
    }
}

// Report dictionaries compare names and keys case-insensitively.
fn lookup_key(name: &str, key_value: &str) -> (String, String) {
    (name.to_uppercase(), key_value.to_uppercase())
}
