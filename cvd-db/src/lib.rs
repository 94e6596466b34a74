//! In-memory SQLite aggregation layer for COVID-19 case data.
//!
//! Ingested records are inserted into an in-memory database and the
//! country/day totals are read back with `GROUP BY` + `SUM` queries.
//! The database only lives while the lookup tables are being built at
//! startup; callers keep the query results, not the connection.
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cvd_db::Database;
//! use cvd_db::models::SnapshotColumn;
//! use cvd_jhu::snapshot::DailySnapshot;
//!
//! let db = Database::new().unwrap();
//! db.load_snapshots(&[DailySnapshot {
//!     date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
//!     country: "Italy".to_string(),
//!     province: String::new(),
//!     confirmed: 1694.0,
//!     deaths: 34.0,
//!     recovered: 83.0,
//! }])
//! .unwrap();
//!
//! let totals = db.query_country_daily(SnapshotColumn::Confirmed).unwrap();
//! assert_eq!(totals.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `snapshots` - one row per daily report row
//! - `cumulative` - the cumulative tables in long form (metric, region, date, value)

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the raw case records.
///
/// Cheaply cloneable (via `Rc`); single-threaded by construction.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
