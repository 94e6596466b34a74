use cvd_db::models::{CountryDateValue, SnapshotColumn};
use cvd_db::Database;
use cvd_jhu::snapshot::DailySnapshot;
use std::collections::BTreeMap;

/// country -> (`YYYY-MM-DD` -> summed value). Inner keys iterate chronologically.
pub type CountryDailyDelta = BTreeMap<String, BTreeMap<String, f64>>;

/// Sum the confirmed count of every snapshot sharing a country and date.
///
/// Only countries with at least one row get an entry.
pub fn aggregate_by_country_daily(snapshots: &[DailySnapshot]) -> anyhow::Result<CountryDailyDelta> {
    let db = Database::new()?;
    db.load_snapshots(snapshots)?;
    let rows = db.query_country_daily(SnapshotColumn::Confirmed)?;
    Ok(group_by_country(rows))
}

pub(crate) fn group_by_country(rows: Vec<CountryDateValue>) -> CountryDailyDelta {
    let mut result = CountryDailyDelta::new();
    for row in rows {
        result
            .entry(row.country)
            .or_default()
            .insert(row.date, row.value);
    }
    result
}
