//! Daily report ingestion.
//!
//! Each `MM-DD-YYYY.csv` file in the daily reports directory holds one row
//! per reporting region for that day. Two header layouts exist in the corpus:
//!
//! - **Early files**: `Province/State,Country/Region,Last Update,Confirmed,Deaths,Recovered[,Latitude,Longitude]`
//! - **Later files**: `FIPS,Admin2,Province_State,Country_Region,Last_Update,Lat,Long_,Confirmed,Deaths,Recovered,Active,...`
//!
//! Both are mapped onto [`DailySnapshot`] by header name, so the extra
//! geo/admin columns of the later layout simply never get read.

use crate::report_name::parse_report_file_name;
use crate::{normalize_header, parse_count};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use cvd_utils::dates::format_date;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// One region's case counts on one day.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub country: String,
    /// Empty when the country reports as a whole.
    pub province: String,
    pub confirmed: f64,
    pub deaths: f64,
    pub recovered: f64,
}

impl DailySnapshot {
    /// Sortable `YYYY-MM-DD` key of the report date.
    pub fn date_key(&self) -> String {
        format_date(&self.date)
    }
}

/// Column positions of the fields we read, resolved once per file.
#[derive(Debug, PartialEq)]
struct ReportColumns {
    country: usize,
    province: Option<usize>,
    confirmed: usize,
    deaths: Option<usize>,
    recovered: Option<usize>,
}

impl ReportColumns {
    fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        let Some(country) = find("Country/Region") else {
            bail!("no country column in headers {:?}", names);
        };
        let Some(confirmed) = find("Confirmed") else {
            bail!("no Confirmed column in headers {:?}", names);
        };
        Ok(Self {
            country,
            province: find("Province/State"),
            confirmed,
            deaths: find("Deaths"),
            recovered: find("Recovered"),
        })
    }

    fn text(record: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| record.get(i)).unwrap_or("").trim().to_string()
    }

    fn count(record: &StringRecord, idx: Option<usize>) -> f64 {
        idx.and_then(|i| record.get(i)).map(parse_count).unwrap_or(0.0)
    }

    fn snapshot(&self, date: NaiveDate, record: &StringRecord) -> DailySnapshot {
        DailySnapshot {
            date,
            country: Self::text(record, Some(self.country)),
            province: Self::text(record, self.province),
            confirmed: Self::count(record, Some(self.confirmed)),
            deaths: Self::count(record, self.deaths),
            recovered: Self::count(record, self.recovered),
        }
    }
}

/// Parse the body of one daily report.
///
/// Rows without a country name are dropped.
pub fn parse_daily_report(date: NaiveDate, csv_data: &str) -> anyhow::Result<Vec<DailySnapshot>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let columns = ReportColumns::from_headers(rdr.headers()?)?;

    let mut snapshots = Vec::new();
    for row in rdr.records() {
        let record = row?;
        let snapshot = columns.snapshot(date, &record);
        if snapshot.country.is_empty() {
            continue;
        }
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

/// Everything read from the daily reports directory.
#[derive(Debug, Default, Clone)]
pub struct DailyReports {
    pub snapshots: Vec<DailySnapshot>,
    /// Number of report files parsed.
    pub files_loaded: usize,
    /// Distinct country names seen across all files.
    pub countries: BTreeSet<String>,
}

impl DailyReports {
    /// Earliest and latest report date, if any report was loaded.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.snapshots.iter().map(|s| s.date).min()?;
        let last = self.snapshots.iter().map(|s| s.date).max()?;
        Some((first, last))
    }
}

/// Load every daily report in `dir`.
///
/// Entries not named like a report are skipped silently; a report that
/// cannot be read or parsed fails the whole load.
pub fn load_daily_reports(dir: &Path) -> anyhow::Result<DailyReports> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read daily reports directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut reports = DailyReports::default();
    for path in paths {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let date = match parse_report_file_name(file_name) {
            None => continue,
            Some(Err(e)) => {
                warn!("Skipping {}: {}", file_name, e);
                continue;
            }
            Some(Ok(date)) => date,
        };

        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read daily report {}", path.display()))?;
        let snapshots = parse_daily_report(date, &body)
            .with_context(|| format!("malformed daily report {}", path.display()))?;

        reports
            .countries
            .extend(snapshots.iter().map(|s| s.country.clone()));
        reports.snapshots.extend(snapshots);
        reports.files_loaded += 1;
    }

    info!("Loaded {} files", reports.files_loaded);
    info!("Countries: {:?}", reports.countries);
    Ok(reports)
}
