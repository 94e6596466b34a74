//! Load everything, then serve the dashboard.

use crate::DataArgs;
use cvd_dash::server;
use cvd_dash::{AppContext, StateStore};
use std::sync::Arc;

pub async fn run_serve(data: &DataArgs, bind: &str) -> anyhow::Result<()> {
    let dashboard = data.load_dashboard()?;
    log::info!(
        "Dashboard ready: {} countries by day, {} in the general view",
        dashboard.countries().len(),
        dashboard.general().countries().len()
    );
    let ctx = Arc::new(AppContext::new(
        dashboard,
        StateStore::new(&data.state_file),
    ));
    server::serve(ctx, bind).await
}
