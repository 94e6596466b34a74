//! Shared utility functions for the COVID-19 dashboard crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD", the sortable key used for daily reports.
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a NaiveDate as "DD/MM/YYYY", the label used for cumulative series.
    pub fn format_day_first(date: &NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    /// Two-digit years belong to the 2000s; anything longer is taken as-is.
    pub fn expand_year(year: i32) -> i32 {
        if (0..100).contains(&year) {
            2000 + year
        } else {
            year
        }
    }

    /// Build a date from separate month, day and year segments.
    ///
    /// Segments are decimal strings as they appear in file names and headers
    /// (`"3"`, `"03"`, `"20"`, `"2020"`).
    pub fn date_from_mdy(month: &str, day: &str, year: &str) -> Result<NaiveDate, DateError> {
        let parse = |segment: &str| {
            segment
                .trim()
                .parse::<u32>()
                .map_err(|_| DateError(format!("non-numeric date segment '{}'", segment)))
        };
        let month = parse(month)?;
        let day = parse(day)?;
        let year = expand_year(parse(year)? as i32);
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DateError(format!("{}-{}-{} is not a calendar date", year, month, day))
        })
    }

    /// Parse a US short date ("M/D/YY" or "M/D/YYYY") as used in the
    /// cumulative time series headers.
    pub fn parse_us_short_date(s: &str) -> Result<NaiveDate, DateError> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        match parts.as_slice() {
            [month, day, year] => date_from_mdy(month, day, year),
            _ => Err(DateError(format!("'{}' is not a M/D/YY date", s))),
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
