//! Loading ingested records into the in-memory database.
//!
//! Inserts run inside a single transaction per call; the cumulative tables
//! alone are ~1M cells for the full corpus.

use crate::Database;
use cvd_jhu::metric::Metric;
use cvd_jhu::snapshot::DailySnapshot;
use cvd_jhu::time_series::TimeSeriesTable;
use cvd_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Insert daily report rows into `snapshots`.
    pub fn load_snapshots(&self, snapshots: &[DailySnapshot]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO snapshots (date, country, province, confirmed, deaths, recovered)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for s in snapshots {
                stmt.execute(params![
                    s.date_key(),
                    s.country,
                    s.province,
                    s.confirmed,
                    s.deaths,
                    s.recovered
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} snapshots", snapshots.len());
        Ok(())
    }

    /// Insert every cell of a cumulative table into `cumulative` under `metric`.
    pub fn load_time_series(&self, metric: Metric, table: &TimeSeriesTable) -> anyhow::Result<()> {
        let date_keys: Vec<String> = table.dates.iter().map(format_date).collect();
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let mut count = 0u64;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cumulative (metric, country, province, date, value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in &table.rows {
                for (date, value) in date_keys.iter().zip(&row.values) {
                    stmt.execute(params![metric.name(), row.country, row.province, date, value])?;
                    count += 1;
                }
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} {} cells", count, metric);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use chrono::NaiveDate;
    use cvd_jhu::metric::Metric;
    use cvd_jhu::snapshot::DailySnapshot;
    use cvd_jhu::time_series::TimeSeriesTable;

    #[test]
    fn load_snapshots_keeps_every_row() {
        let db = Database::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let county = |confirmed: f64| DailySnapshot {
            date,
            country: "US".to_string(),
            province: "South Carolina".to_string(),
            confirmed,
            deaths: 0.0,
            recovered: 0.0,
        };
        db.load_snapshots(&[county(39.0), county(133.0)]).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2, "County rows sharing a province are all kept");

        let key: String = conn
            .query_row("SELECT DISTINCT date FROM snapshots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(key, "2020-06-01");
    }

    #[test]
    fn load_time_series_flattens_cells() {
        let db = Database::new().unwrap();
        let csv = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Afghanistan,33.9,67.7,0,1
Hubei,China,30.9,112.2,444,549
";
        let table = TimeSeriesTable::parse_csv(csv).unwrap();
        db.load_time_series(Metric::Deaths, &table).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM cumulative WHERE metric = 'Deaths'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);

        let value: f64 = conn
            .query_row(
                "SELECT value FROM cumulative WHERE country = 'China' AND date = '2020-01-23'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((value - 549.0).abs() < 0.01);
    }
}
