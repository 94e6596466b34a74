//! SQL schema for the in-memory aggregation database.

/// Returns the full SQL schema as a single batch string.
///
/// - `snapshots` - daily report rows (date key `YYYY-MM-DD`, country, province, counts)
/// - `cumulative` - cumulative table cells, one row per (metric, country, province, date)
///
/// Neither table has a primary key: later daily reports list several
/// county rows under the same (country, province), and all of them count.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS snapshots (
        date TEXT NOT NULL,
        country TEXT NOT NULL,
        province TEXT NOT NULL,
        confirmed REAL NOT NULL,
        deaths REAL NOT NULL,
        recovered REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_snap_country_date ON snapshots(country, date);

    CREATE TABLE IF NOT EXISTS cumulative (
        metric TEXT NOT NULL,
        country TEXT NOT NULL,
        province TEXT NOT NULL,
        date TEXT NOT NULL,
        value REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_cum_metric_date ON cumulative(metric, date);
    CREATE INDEX IF NOT EXISTS idx_cum_metric_country ON cumulative(metric, country, date);
    "#
}
