//! Selection -> chart payload.
//!
//! Payloads follow the Plotly figure layout the page script renders
//! directly: `{"data": [{"type": "scatter", "x": [..], "y": [..], "name": ..}],
//! "layout": {"title": ..}}`.

use crate::dashboard::Dashboard;
use cvd_jhu::metric::Metric;
use serde::{Deserialize, Serialize};

/// Pseudo-country selecting the world total in the general panel.
pub const TOTAL: &str = "Total";

/// Title of the general chart before anything is selected.
pub const GENERAL_PROMPT: &str = "Select type to display its graph";

/// One named line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: Vec<String>,
    /// `null` marks an undefined point (Death/Outcome before any outcome).
    pub y: Vec<Option<f64>>,
    pub name: String,
}

impl LineSeries {
    fn scatter(name: String, x: Vec<String>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: "scatter".to_string(),
            x,
            y,
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
}

/// A chart description: the lines and the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub data: Vec<LineSeries>,
    pub layout: Layout,
}

impl ChartPayload {
    /// Chart with no lines.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: title.into(),
            },
        }
    }
}

pub fn by_country_title(countries: &[String]) -> String {
    format!(
        "Developing COVID-19 cases day-by-day in countries: [{}]",
        countries.join(", ")
    )
}

pub fn general_title(metrics: &[String], countries: &[String]) -> String {
    format!(
        "Developing COVID-19 cases day-by-day: [{}], [{}]",
        metrics.join(", "),
        countries.join(", ")
    )
}

impl Dashboard {
    /// One confirmed-cases line per selected country, in selection order.
    ///
    /// Countries missing from the data contribute no line.
    pub fn build_by_country_series(&self, countries: &[String]) -> ChartPayload {
        let mut chart = ChartPayload::empty(by_country_title(countries));
        for country in countries {
            let Some(per_day) = self.by_country.get(country) else {
                log::debug!("by-country: no data for '{}'", country);
                continue;
            };
            chart.data.push(LineSeries::scatter(
                country.clone(),
                per_day.keys().cloned().collect(),
                per_day.values().copied().map(Some).collect(),
            ));
        }
        chart
    }

    /// For each metric: the world total first when [`TOTAL`] is selected,
    /// then one line per other selected country, in selection order.
    ///
    /// Lines are named by the canonical metric name whatever spelling was
    /// selected. Unknown metrics and countries contribute no line.
    pub fn build_general_series(&self, metrics: &[String], countries: &[String]) -> ChartPayload {
        let mut chart = ChartPayload::empty(general_title(metrics, countries));
        let x = self.general.date_labels();
        let with_total = countries.iter().any(|c| c == TOTAL);

        for name in metrics {
            let metric: Metric = match name.parse() {
                Ok(metric) => metric,
                Err(e) => {
                    log::debug!("general: {}", e);
                    continue;
                }
            };
            if with_total {
                if let Some(values) = self.general.world(metric) {
                    chart.data.push(LineSeries::scatter(
                        format!("{} ({})", metric, TOTAL),
                        x.clone(),
                        values.to_vec(),
                    ));
                }
            }
            for country in countries.iter().filter(|c| c.as_str() != TOTAL) {
                let Some(values) = self.general.country(metric, country) else {
                    log::debug!("general: no {} data for '{}'", metric, country);
                    continue;
                };
                chart.data.push(LineSeries::scatter(
                    format!("{} ({})", metric, country),
                    x.clone(),
                    values.to_vec(),
                ));
            }
        }
        chart
    }
}
