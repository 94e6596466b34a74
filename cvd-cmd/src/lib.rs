//! Command implementations for the COVID-19 dashboard CLI.
//!
//! Every command that reads the corpus goes through [`DataArgs::load_dashboard`],
//! so ingestion and aggregation failures abort the command before any
//! output is produced.

use clap::{Args, Subcommand};
use cvd_dash::Dashboard;
use cvd_jhu::snapshot::{load_daily_reports, DailyReports};
use cvd_jhu::time_series::CumulativeTables;
use std::path::PathBuf;

pub mod chart;
pub mod fetch;
pub mod serve;
pub mod summary;

pub const DEFAULT_DAILY_REPORTS: &str = "COVID-19/csse_covid_19_data/csse_covid_19_daily_reports";
pub const DEFAULT_TIME_SERIES: &str = "COVID-19/csse_covid_19_data/csse_covid_19_time_series";

/// Where the corpus and the selection file live.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory of MM-DD-YYYY.csv daily reports
    #[arg(long, default_value = DEFAULT_DAILY_REPORTS)]
    pub daily_reports: PathBuf,

    /// Directory holding the time_series_covid19_*_global.csv files
    #[arg(long, default_value = DEFAULT_TIME_SERIES)]
    pub time_series: PathBuf,

    /// JSON file the last selection is persisted to
    #[arg(long, default_value = "state.json")]
    pub state_file: PathBuf,
}

impl DataArgs {
    /// Ingest both datasets.
    pub fn load_sources(&self) -> anyhow::Result<(DailyReports, CumulativeTables)> {
        let reports = load_daily_reports(&self.daily_reports)?;
        let tables = CumulativeTables::load(&self.time_series)?;
        Ok((reports, tables))
    }

    /// Ingest and aggregate into the dashboard lookup tables.
    pub fn load_dashboard(&self) -> anyhow::Result<Dashboard> {
        let (reports, tables) = self.load_sources()?;
        Dashboard::from_sources(&reports, &tables)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the corpus and serve the dashboard
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8050")]
        bind: String,
    },

    /// Print what the corpus contains
    Summary {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print a chart payload as JSON without touching the selection file
    Chart {
        #[command(flatten)]
        data: DataArgs,

        #[command(subcommand)]
        view: chart::ChartView,
    },

    /// Download the corpus (daily reports are fetched incrementally)
    Fetch {
        /// Directory to write daily reports into
        #[arg(long, default_value = DEFAULT_DAILY_REPORTS)]
        daily_reports: PathBuf,

        /// Directory to write the cumulative tables into
        #[arg(long, default_value = DEFAULT_TIME_SERIES)]
        time_series: PathBuf,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve { data, bind } => serve::run_serve(&data, &bind).await,
        Command::Summary { data } => summary::run_summary(&data),
        Command::Chart { data, view } => chart::run_chart(&data, &view),
        Command::Fetch {
            daily_reports,
            time_series,
        } => fetch::run_fetch(&daily_reports, &time_series).await,
    }
}
