//! Grouped `SUM` queries over the loaded records.
//!
//! Date keys are `YYYY-MM-DD`, so `ORDER BY date` is chronological.

use crate::models::{CountryDateValue, DateValue, SnapshotColumn};
use crate::Database;
use cvd_jhu::metric::Metric;
use rusqlite::params;

impl Database {
    /// Daily report totals per country and day, provinces summed away.
    ///
    /// Ordered by country then date. Countries without rows do not appear.
    pub fn query_country_daily(
        &self,
        column: SnapshotColumn,
    ) -> anyhow::Result<Vec<CountryDateValue>> {
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT country, date, SUM({}) FROM snapshots
             GROUP BY country, date
             ORDER BY country, date",
            column.column()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CountryDateValue {
                    country: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_country_daily({}) returned {} records",
            column.column(),
            rows.len()
        );
        Ok(rows)
    }

    /// World total of a cumulative metric per day.
    pub fn query_world_totals(&self, metric: Metric) -> anyhow::Result<Vec<DateValue>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, SUM(value) FROM cumulative
             WHERE metric = ?1
             GROUP BY date
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![metric.name()], |row| {
                Ok(DateValue {
                    date: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_world_totals({}) returned {} records",
            metric,
            rows.len()
        );
        Ok(rows)
    }

    /// Per-country total of a cumulative metric per day, provinces summed away.
    pub fn query_country_totals(&self, metric: Metric) -> anyhow::Result<Vec<CountryDateValue>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT country, date, SUM(value) FROM cumulative
             WHERE metric = ?1
             GROUP BY country, date
             ORDER BY country, date",
        )?;
        let rows = stmt
            .query_map(params![metric.name()], |row| {
                Ok(CountryDateValue {
                    country: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_country_totals({}) returned {} records",
            metric,
            rows.len()
        );
        Ok(rows)
    }
}
