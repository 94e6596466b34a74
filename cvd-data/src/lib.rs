//! Aggregation of ingested case data into chart lookup tables.
//!
//! - [`by_country`]: daily report totals per country and day
//! - [`general`]: cumulative world and per-country series, with the derived
//!   `Active` and `Death/Outcome` metrics

pub mod by_country;
pub mod general;

pub use by_country::{aggregate_by_country_daily, CountryDailyDelta};
pub use general::{aggregate_general, GeneralMetricSeries};
