//! Cumulative time series ingestion.
//!
//! The global time series files have one row per (country, province) and
//! one column per day:
//!
//! ```text
//! Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
//! ,Afghanistan,33.93911,67.709953,0,0,...
//! ```
//!
//! Date headers are US `M/D/YY`; they are parsed once here and exposed as
//! chronological dates plus `DD/MM/YYYY` labels for charting.

use crate::metric::Metric;
use crate::{normalize_header, parse_count};
use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use cvd_utils::dates::{format_day_first, parse_us_short_date};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// One (country, province) row of a cumulative table.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub country: String,
    pub province: String,
    /// One value per entry of [`TimeSeriesTable::dates`].
    pub values: Vec<f64>,
}

/// A cumulative metric table, columns are days.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<TimeSeriesRow>,
}

impl TimeSeriesTable {
    /// Parse a cumulative table from CSV text.
    ///
    /// Identifier columns are located by name; every header that reads as a
    /// `M/D/YY` date becomes a value column and anything else (`Lat`,
    /// `Long`) is ignored.
    pub fn parse_csv(csv_data: &str) -> anyhow::Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut country_idx = None;
        let mut province_idx = None;
        let mut date_columns: Vec<(usize, NaiveDate)> = Vec::new();
        for (idx, raw) in rdr.headers()?.iter().enumerate() {
            match normalize_header(raw).as_str() {
                "Country/Region" => country_idx = Some(idx),
                "Province/State" => province_idx = Some(idx),
                other => {
                    if let Ok(date) = parse_us_short_date(other) {
                        date_columns.push((idx, date));
                    }
                }
            }
        }
        let country_idx = country_idx.ok_or_else(|| anyhow!("no Country/Region column"))?;
        if date_columns.is_empty() {
            bail!("no date columns");
        }

        let mut rows = Vec::new();
        for row in rdr.records() {
            let record = row?;
            let country = record.get(country_idx).unwrap_or("").trim().to_string();
            if country.is_empty() {
                continue;
            }
            let province = province_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string();
            let values = date_columns
                .iter()
                .map(|(idx, _)| record.get(*idx).map(parse_count).unwrap_or(0.0))
                .collect();
            rows.push(TimeSeriesRow {
                country,
                province,
                values,
            });
        }

        Ok(Self {
            dates: date_columns.into_iter().map(|(_, d)| d).collect(),
            rows,
        })
    }

    /// Read and parse a cumulative table from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read time series {}", path.display()))?;
        let table = Self::parse_csv(&body)
            .with_context(|| format!("malformed time series {}", path.display()))?;
        info!(
            "Loaded {} rows x {} days from {}",
            table.rows.len(),
            table.dates.len(),
            path.display()
        );
        Ok(table)
    }

    /// Date columns rewritten as `DD/MM/YYYY`.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates.iter().map(format_day_first).collect()
    }

    /// Distinct countries in the table.
    pub fn countries(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.country.clone()).collect()
    }
}

/// The three cumulative source tables of the general view.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CumulativeTables {
    pub confirmed: TimeSeriesTable,
    pub deaths: TimeSeriesTable,
    pub recovered: TimeSeriesTable,
}

impl CumulativeTables {
    /// Load the confirmed, deaths and recovered global files from `dir`.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let load = |metric: Metric| -> anyhow::Result<TimeSeriesTable> {
            let file = metric
                .time_series_file()
                .ok_or_else(|| anyhow!("{} has no time series file", metric))?;
            TimeSeriesTable::load(&dir.join(file))
        };
        Ok(Self {
            confirmed: load(Metric::Confirmed)?,
            deaths: load(Metric::Deaths)?,
            recovered: load(Metric::Recovered)?,
        })
    }

    /// The table backing a source metric; `None` for derived metrics.
    pub fn table(&self, metric: Metric) -> Option<&TimeSeriesTable> {
        match metric {
            Metric::Confirmed => Some(&self.confirmed),
            Metric::Deaths => Some(&self.deaths),
            Metric::Recovered => Some(&self.recovered),
            Metric::Active | Metric::DeathOutcome => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONFIRMED: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
,Afghanistan,33.93911,67.709953,0,1,3
Hubei,China,30.9756,112.2707,444,444,549
Beijing,China,40.1824,116.4142,14,22,36
";

    #[test]
    fn parses_dates_and_rows() {
        let table = TimeSeriesTable::parse_csv(CONFIRMED).unwrap();
        assert_eq!(table.dates.len(), 3);
        assert_eq!(table.dates[0], NaiveDate::from_ymd_opt(2020, 1, 22).unwrap());
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].country, "China");
        assert_eq!(table.rows[1].province, "Hubei");
        assert_eq!(table.rows[2].values, vec![14.0, 22.0, 36.0]);
    }

    #[test]
    fn rewrites_date_labels_day_first() {
        let table = TimeSeriesTable::parse_csv(CONFIRMED).unwrap();
        assert_eq!(
            table.date_labels(),
            vec!["22/01/2020", "23/01/2020", "24/01/2020"]
        );
    }

    #[test]
    fn lists_distinct_countries() {
        let table = TimeSeriesTable::parse_csv(CONFIRMED).unwrap();
        let countries: Vec<String> = table.countries().into_iter().collect();
        assert_eq!(countries, vec!["Afghanistan", "China"]);
    }

    #[test]
    fn table_without_dates_is_an_error() {
        let csv = "Province/State,Country/Region,Lat,Long\n,Afghanistan,33.9,67.7\n";
        assert!(TimeSeriesTable::parse_csv(csv).is_err());
    }

    #[test]
    fn loads_all_three_tables() {
        let dir = tempfile::tempdir().unwrap();
        for metric in Metric::SOURCES {
            fs::write(dir.path().join(metric.time_series_file().unwrap()), CONFIRMED).unwrap();
        }
        let tables = CumulativeTables::load(dir.path()).unwrap();
        assert_eq!(tables.deaths.rows.len(), 3);
        assert!(tables.table(Metric::Recovered).is_some());
        assert!(tables.table(Metric::Active).is_none());
    }

    #[test]
    fn missing_table_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(Metric::Confirmed.time_series_file().unwrap()),
            CONFIRMED,
        )
        .unwrap();
        assert!(CumulativeTables::load(dir.path()).is_err());
    }
}
