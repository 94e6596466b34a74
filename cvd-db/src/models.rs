//! Query result models.

use serde::Serialize;

/// A (date, value) pair of a world-total series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: f64,
}

/// A (country, date, value) triple of a per-country series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryDateValue {
    pub country: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: f64,
}

/// Count column of the `snapshots` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotColumn {
    Confirmed,
    Deaths,
    Recovered,
}

impl SnapshotColumn {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            SnapshotColumn::Confirmed => "confirmed",
            SnapshotColumn::Deaths => "deaths",
            SnapshotColumn::Recovered => "recovered",
        }
    }
}
