use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A chartable metric of the general view.
///
/// The first three come straight from the cumulative source files; `Active`
/// and `DeathOutcome` are derived from them during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    Confirmed,
    Deaths,
    Recovered,
    Active,
    DeathOutcome,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Confirmed,
        Metric::Deaths,
        Metric::Recovered,
        Metric::Active,
        Metric::DeathOutcome,
    ];

    /// Metrics read from their own cumulative file.
    pub const SOURCES: [Metric; 3] = [Metric::Confirmed, Metric::Deaths, Metric::Recovered];

    /// Display name, also the value the dashboard sends back in selections.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Confirmed => "Confirmed",
            Metric::Deaths => "Deaths",
            Metric::Recovered => "Recovered",
            Metric::Active => "Active",
            Metric::DeathOutcome => "Death/Outcome",
        }
    }

    /// Name of the cumulative global file holding this metric, if it has one.
    pub fn time_series_file(&self) -> Option<&'static str> {
        match self {
            Metric::Confirmed => Some("time_series_covid19_confirmed_global.csv"),
            Metric::Deaths => Some("time_series_covid19_deaths_global.csv"),
            Metric::Recovered => Some("time_series_covid19_recovered_global.csv"),
            Metric::Active | Metric::DeathOutcome => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(Metric::Confirmed),
            "deaths" => Ok(Metric::Deaths),
            "recovered" => Ok(Metric::Recovered),
            "active" => Ok(Metric::Active),
            "death/outcome" | "death-outcome-ratio" | "death-outcome" => Ok(Metric::DeathOutcome),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}
