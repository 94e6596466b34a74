//! Core record types and CSV ingestion for the JHU CSSE COVID-19 corpus.
//!
//! - [`snapshot`]: per-day reports (`MM-DD-YYYY.csv`) normalized into
//!   [`snapshot::DailySnapshot`] rows
//! - [`time_series`]: cumulative `time_series_covid19_*_global.csv` tables
//! - [`metric`]: the metric names shared by ingestion, aggregation and charts
//! - `source` (feature `api`): downloads the corpus from the public mirror

pub mod date_range;
pub mod metric;
pub mod report_name;
pub mod snapshot;
pub mod time_series;

#[cfg(feature = "api")]
pub mod source;

/// Parse a numeric CSV cell. Blank and non-numeric cells count as zero.
pub(crate) fn parse_count(cell: &str) -> f64 {
    let trimmed = cell.trim();
    match trimmed {
        "" => 0.0,
        s => s.parse::<f64>().unwrap_or_default(),
    }
}

/// Canonical header name: BOM and whitespace stripped, newer-schema
/// spellings mapped onto the older `Country/Region` style.
pub(crate) fn normalize_header(header: &str) -> String {
    let cleaned = header.trim_start_matches('\u{feff}').trim();
    match cleaned {
        "Country_Region" => "Country/Region".to_string(),
        "Province_State" => "Province/State".to_string(),
        "Last_Update" => "Last Update".to_string(),
        "Long_" => "Long".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_handles_blank_and_junk() {
        assert_eq!(parse_count("12"), 12.0);
        assert_eq!(parse_count(" 7.0 "), 7.0);
        assert_eq!(parse_count(""), 0.0);
        assert_eq!(parse_count("n/a"), 0.0);
    }

    #[test]
    fn normalize_header_maps_new_schema() {
        assert_eq!(normalize_header("Country_Region"), "Country/Region");
        assert_eq!(normalize_header("\u{feff}Province/State"), "Province/State");
        assert_eq!(normalize_header(" Confirmed "), "Confirmed");
    }
}
