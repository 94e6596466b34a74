//! covid-dash - COVID-19 case dashboard over the JHU CSSE corpus.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "covid-dash",
    version,
    about = "COVID-19 case-count dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: cvd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cvd_cmd::run(cli.command).await
}
