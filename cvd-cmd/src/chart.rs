//! Offline chart payloads, printed as JSON.

use crate::DataArgs;
use clap::Subcommand;
use cvd_dash::{ChartPayload, Dashboard};

#[derive(Subcommand, Debug, Clone)]
pub enum ChartView {
    /// Confirmed cases per selected country
    ByCountry {
        /// Country to plot (repeatable)
        #[arg(short, long = "country")]
        countries: Vec<String>,
    },
    /// Metrics for selected countries and/or "Total"
    General {
        /// Metric to plot (repeatable): Confirmed, Deaths, Recovered, Active, Death/Outcome
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        /// Country to plot (repeatable); "Total" selects the world total
        #[arg(short, long = "country")]
        countries: Vec<String>,
    },
}

pub fn run_chart(data: &DataArgs, view: &ChartView) -> anyhow::Result<()> {
    let dashboard = data.load_dashboard()?;
    let chart = build_chart(&dashboard, view);
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

pub fn build_chart(dashboard: &Dashboard, view: &ChartView) -> ChartPayload {
    match view {
        ChartView::ByCountry { countries } => dashboard.build_by_country_series(countries),
        ChartView::General { metrics, countries } => {
            dashboard.build_general_series(metrics, countries)
        }
    }
}
