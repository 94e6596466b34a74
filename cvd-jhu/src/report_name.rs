//! Daily report file names: `MM-DD-YYYY.csv`.

use chrono::NaiveDate;
use cvd_utils::dates::date_from_mdy;
use cvd_utils::error::DateError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REPORT_NAME: Regex = Regex::new(r"^(\d+)-(\d+)-(\d+)\.csv$").unwrap();
}

/// Read the report date out of a daily report file name.
///
/// Returns `None` when the name is not shaped like a report at all, and
/// `Some(Err(_))` when it is shaped like one but the segments do not form
/// a calendar date.
pub fn parse_report_file_name(file_name: &str) -> Option<Result<NaiveDate, DateError>> {
    let caps = REPORT_NAME.captures(file_name)?;
    Some(date_from_mdy(&caps[1], &caps[2], &caps[3]))
}

/// File name the corpus uses for the report of `date`.
pub fn report_file_name(date: &NaiveDate) -> String {
    date.format("%m-%d-%Y.csv").to_string()
}
