//! Dashboard layer for the COVID-19 case charts.
//!
//! - `dashboard`: the read-only lookup tables built at startup
//! - `series`: selection -> chart payload (`{data: [...], layout: {title}}`)
//! - `state`: the persisted selection and its JSON file store
//! - `context`: the application object handed to every handler
//! - `server`: axum routes and the embedded page assets

pub mod context;
pub mod dashboard;
pub mod series;
pub mod server;
pub mod state;

pub use context::AppContext;
pub use dashboard::Dashboard;
pub use series::ChartPayload;
pub use state::{SelectionState, StateStore};
