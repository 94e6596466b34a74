use crate::series::TOTAL;
use cvd_data::{aggregate_by_country_daily, aggregate_general, CountryDailyDelta, GeneralMetricSeries};
use cvd_jhu::snapshot::DailyReports;
use cvd_jhu::time_series::CumulativeTables;

/// Lookup tables behind both chart panels. Built once, then read-only.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub(crate) by_country: CountryDailyDelta,
    pub(crate) general: GeneralMetricSeries,
}

impl Dashboard {
    pub fn new(by_country: CountryDailyDelta, general: GeneralMetricSeries) -> Self {
        Self {
            by_country,
            general,
        }
    }

    /// Aggregate freshly ingested data into the lookup tables.
    pub fn from_sources(reports: &DailyReports, tables: &CumulativeTables) -> anyhow::Result<Self> {
        let by_country = aggregate_by_country_daily(&reports.snapshots)?;
        let general = aggregate_general(tables)?;
        Ok(Self::new(by_country, general))
    }

    pub fn general(&self) -> &GeneralMetricSeries {
        &self.general
    }

    /// Options of the "By Countries" panel, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.by_country.keys().cloned().collect()
    }

    /// Options of the "General" panel: sorted countries, then the world total.
    pub fn general_countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self.general.countries().into_iter().collect();
        countries.push(TOTAL.to_string());
        countries
    }
}
