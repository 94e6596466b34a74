//! Download the corpus from the public JHU CSSE mirror.
//!
//! The cumulative tables are rewritten on every run. Daily reports never
//! change once published, so only days without a local file are fetched.

use chrono::NaiveDate;
use cvd_jhu::date_range::ReportDays;
use cvd_jhu::metric::Metric;
use cvd_jhu::report_name::report_file_name;
use cvd_jhu::source::CsseClient;
use log::{info, warn};
use std::path::Path;
use std::time::Duration;

pub async fn run_fetch(daily_reports: &Path, time_series: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(daily_reports)?;
    std::fs::create_dir_all(time_series)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let csse = CsseClient::new(client);

    for metric in Metric::SOURCES {
        let body = csse.get_time_series(metric).await?;
        if let Some(file) = metric.time_series_file() {
            let path = time_series.join(file);
            std::fs::write(&path, body)?;
            info!("Wrote {}", path.display());
        }
    }

    let missing = missing_reports(daily_reports, ReportDays::publishing_period());
    info!("{} daily reports to fetch", missing.len());

    let mut written = 0u32;
    let mut unpublished = 0u32;
    let mut failed = 0u32;
    for date in missing {
        match csse.get_daily_report(&date).await {
            Ok(Some(body)) => {
                std::fs::write(daily_reports.join(report_file_name(&date)), body)?;
                written += 1;
            }
            Ok(None) => {
                warn!("No report published for {}", date);
                unpublished += 1;
            }
            Err(e) => {
                warn!("Giving up on {}: {:#}", date, e);
                failed += 1;
            }
        }
        // Be polite to the mirror
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    info!(
        "Fetch complete: {} written, {} unpublished, {} failed",
        written, unpublished, failed
    );
    if failed > 0 {
        anyhow::bail!("{} daily reports could not be downloaded; rerun to resume", failed);
    }
    Ok(())
}

/// Days in `days` whose report file is not in `dir` yet.
pub fn missing_reports(dir: &Path, days: ReportDays) -> Vec<NaiveDate> {
    days.filter(|date| !dir.join(report_file_name(date)).is_file())
        .collect()
}
