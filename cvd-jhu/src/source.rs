//! Download client for the JHU CSSE corpus on GitHub.

use crate::metric::Metric;
use crate::report_name::report_file_name;
use anyhow::anyhow;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Raw-content root of `csse_covid_19_data` in the public repository.
pub const RAW_DATA_URL: &str =
    "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data";

const MAX_TRIES: u32 = 3;

/// Fetches daily reports and cumulative tables as CSV text.
#[derive(Clone)]
pub struct CsseClient {
    client: Client,
    base_url: String,
}

impl CsseClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, RAW_DATA_URL)
    }

    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn daily_report_url(&self, date: &NaiveDate) -> String {
        format!(
            "{}/csse_covid_19_daily_reports/{}",
            self.base_url,
            report_file_name(date)
        )
    }

    pub fn time_series_url(&self, metric: Metric) -> Option<String> {
        metric
            .time_series_file()
            .map(|file| format!("{}/csse_covid_19_time_series/{}", self.base_url, file))
    }

    /// Fetch the daily report for `date`; `Ok(None)` when none was published.
    pub async fn get_daily_report(&self, date: &NaiveDate) -> anyhow::Result<Option<String>> {
        self.get_csv(&self.daily_report_url(date)).await
    }

    /// Fetch the cumulative table of a source metric.
    pub async fn get_time_series(&self, metric: Metric) -> anyhow::Result<String> {
        let url = self
            .time_series_url(metric)
            .ok_or_else(|| anyhow!("{} is derived and has no source file", metric))?;
        self.get_csv(&url)
            .await?
            .ok_or_else(|| anyhow!("{} not found at {}", metric, url))
    }

    /// GET with retry and exponential backoff. A 404 is an answer, not a
    /// failure, and is returned as `Ok(None)` without retrying.
    async fn get_csv(&self, url: &str) -> anyhow::Result<Option<String>> {
        let mut sleep_millis: u64 = 1000;

        for attempt in 1..=MAX_TRIES {
            match self.client.get(url).send().await {
                Ok(response) => match response.status() {
                    StatusCode::OK => match response.text().await {
                        Ok(body) => return Ok(Some(body)),
                        Err(e) => warn!(
                            "Attempt {}/{}: Failed to read body of {}: {}",
                            attempt, MAX_TRIES, url, e
                        ),
                    },
                    StatusCode::NOT_FOUND => return Ok(None),
                    status => warn!(
                        "Attempt {}/{}: Bad response status for {}: {}",
                        attempt, MAX_TRIES, url, status
                    ),
                },
                Err(e) => warn!(
                    "Attempt {}/{}: Request failed for {}: {}",
                    attempt, MAX_TRIES, url, e
                ),
            }

            if attempt < MAX_TRIES {
                info!("Sleeping for {} milliseconds before retry", sleep_millis);
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        Err(anyhow!("All {} attempts failed for {}", MAX_TRIES, url))
    }
}
