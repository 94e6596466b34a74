//! World and per-country series of the general view.
//!
//! Confirmed, Deaths and Recovered are summed out of their cumulative
//! tables; Active and Death/Outcome are derived from those sums day by day.
//! The three tables must share one set of date columns.

use crate::by_country::group_by_country;
use anyhow::bail;
use chrono::NaiveDate;
use cvd_db::models::DateValue;
use cvd_db::Database;
use cvd_jhu::metric::Metric;
use cvd_jhu::time_series::CumulativeTables;
use cvd_utils::dates::{format_date, format_day_first};
use std::collections::{BTreeMap, BTreeSet};

/// One value per date; `None` marks a day where the metric is undefined.
pub type Values = Vec<Option<f64>>;

/// Aggregated general-view series, all aligned to [`GeneralMetricSeries::dates`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneralMetricSeries {
    dates: Vec<NaiveDate>,
    world: BTreeMap<Metric, Values>,
    by_country: BTreeMap<Metric, BTreeMap<String, Values>>,
}

impl GeneralMetricSeries {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Date axis as `DD/MM/YYYY` labels.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates.iter().map(format_day_first).collect()
    }

    /// World total of `metric`.
    pub fn world(&self, metric: Metric) -> Option<&[Option<f64>]> {
        self.world.get(&metric).map(Vec::as_slice)
    }

    /// `metric` for one country, `None` if the country is not in the data.
    pub fn country(&self, metric: Metric, country: &str) -> Option<&[Option<f64>]> {
        self.by_country
            .get(&metric)
            .and_then(|countries| countries.get(country))
            .map(Vec::as_slice)
    }

    /// Countries with at least one source series.
    pub fn countries(&self) -> BTreeSet<String> {
        Metric::SOURCES
            .iter()
            .filter_map(|m| self.by_country.get(m))
            .flat_map(|countries| countries.keys().cloned())
            .collect()
    }
}

/// Sum the cumulative tables into world and per-country series and derive
/// `Active` and `Death/Outcome`.
///
/// Fails if the deaths or recovered table has different date columns than
/// the confirmed table.
pub fn aggregate_general(tables: &CumulativeTables) -> anyhow::Result<GeneralMetricSeries> {
    let dates = tables.confirmed.dates.clone();
    for metric in [Metric::Deaths, Metric::Recovered] {
        let Some(table) = tables.table(metric) else {
            continue;
        };
        if table.dates != dates {
            bail!(
                "{} table has {} date columns ({:?}..{:?}), Confirmed has {} ({:?}..{:?}); \
                 cumulative tables must share one date axis",
                metric,
                table.dates.len(),
                table.dates.first(),
                table.dates.last(),
                dates.len(),
                dates.first(),
                dates.last()
            );
        }
    }

    let db = Database::new()?;
    for metric in Metric::SOURCES {
        if let Some(table) = tables.table(metric) {
            db.load_time_series(metric, table)?;
        }
    }

    let keys: Vec<String> = dates.iter().map(format_date).collect();
    let mut world = BTreeMap::new();
    let mut by_country = BTreeMap::new();
    for metric in Metric::SOURCES {
        world.insert(metric, align_totals(&keys, db.query_world_totals(metric)?));

        let countries: BTreeMap<String, Values> =
            group_by_country(db.query_country_totals(metric)?)
                .into_iter()
                .map(|(country, per_day)| {
                    let values = keys
                        .iter()
                        .map(|k| Some(per_day.get(k).copied().unwrap_or(0.0)))
                        .collect();
                    (country, values)
                })
                .collect();
        by_country.insert(metric, countries);
    }

    let (world_active, world_ratio) = derive(
        &world[&Metric::Confirmed],
        &world[&Metric::Deaths],
        &world[&Metric::Recovered],
    );
    world.insert(Metric::Active, world_active);
    world.insert(Metric::DeathOutcome, world_ratio);

    let mut country_active = BTreeMap::new();
    let mut country_ratio = BTreeMap::new();
    for (country, confirmed) in &by_country[&Metric::Confirmed] {
        let deaths = by_country[&Metric::Deaths].get(country);
        let recovered = by_country[&Metric::Recovered].get(country);
        let (Some(deaths), Some(recovered)) = (deaths, recovered) else {
            log::debug!("{} is missing from a source table; no derived series", country);
            continue;
        };
        let (active, ratio) = derive(confirmed, deaths, recovered);
        country_active.insert(country.clone(), active);
        country_ratio.insert(country.clone(), ratio);
    }
    by_country.insert(Metric::Active, country_active);
    by_country.insert(Metric::DeathOutcome, country_ratio);

    log::info!(
        "general: {} days, {} countries",
        dates.len(),
        by_country[&Metric::Confirmed].len()
    );
    Ok(GeneralMetricSeries {
        dates,
        world,
        by_country,
    })
}

fn align_totals(keys: &[String], totals: Vec<DateValue>) -> Values {
    let lookup: BTreeMap<String, f64> = totals.into_iter().map(|dv| (dv.date, dv.value)).collect();
    keys.iter()
        .map(|k| Some(lookup.get(k).copied().unwrap_or(0.0)))
        .collect()
}

/// Active = Confirmed - Recovered - Deaths, left unclamped.
pub fn active(confirmed: f64, deaths: f64, recovered: f64) -> f64 {
    confirmed - recovered - deaths
}

/// 100 * Deaths / (Recovered + Deaths); `None` when nobody has an outcome yet.
pub fn death_outcome_ratio(deaths: f64, recovered: f64) -> Option<f64> {
    let outcomes = recovered + deaths;
    if outcomes == 0.0 {
        None
    } else {
        Some(100.0 * deaths / outcomes)
    }
}

fn derive(confirmed: &[Option<f64>], deaths: &[Option<f64>], recovered: &[Option<f64>]) -> (Values, Values) {
    confirmed
        .iter()
        .zip(deaths)
        .zip(recovered)
        .map(|((c, d), r)| match (c, d, r) {
            (Some(c), Some(d), Some(r)) => (Some(active(*c, *d, *r)), death_outcome_ratio(*d, *r)),
            _ => (None, None),
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_jhu::time_series::TimeSeriesTable;

    const HEADER: &str = "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20\n";

    fn table(rows: &str) -> TimeSeriesTable {
        TimeSeriesTable::parse_csv(&format!("{}{}", HEADER, rows)).unwrap()
    }

    fn sample_tables() -> CumulativeTables {
        CumulativeTables {
            confirmed: table(
                ",Italy,41.8,12.5,10,20,40\n\
                 Hubei,China,30.9,112.2,100,200,300\n\
                 Beijing,China,40.1,116.4,5,5,10\n",
            ),
            deaths: table(
                ",Italy,41.8,12.5,0,1,4\n\
                 Hubei,China,30.9,112.2,0,10,20\n\
                 Beijing,China,40.1,116.4,0,0,0\n",
            ),
            recovered: table(
                ",Italy,41.8,12.5,0,3,6\n\
                 Hubei,China,30.9,112.2,0,30,50\n\
                 Beijing,China,40.1,116.4,0,2,2\n",
            ),
        }
    }

    #[test]
    fn world_totals_sum_every_row() {
        let general = aggregate_general(&sample_tables()).unwrap();
        assert_eq!(
            general.world(Metric::Confirmed).unwrap(),
            &[Some(115.0), Some(225.0), Some(350.0)]
        );
        assert_eq!(
            general.world(Metric::Deaths).unwrap(),
            &[Some(0.0), Some(11.0), Some(24.0)]
        );
    }

    #[test]
    fn countries_sum_their_provinces() {
        let general = aggregate_general(&sample_tables()).unwrap();
        assert_eq!(
            general.country(Metric::Confirmed, "China").unwrap(),
            &[Some(105.0), Some(205.0), Some(310.0)]
        );
        assert!(general.country(Metric::Confirmed, "Atlantis").is_none());
        let countries: Vec<String> = general.countries().into_iter().collect();
        assert_eq!(countries, vec!["China", "Italy"]);
    }

    #[test]
    fn active_holds_element_wise() {
        let general = aggregate_general(&sample_tables()).unwrap();
        let mut scopes: Vec<Option<String>> = vec![None];
        scopes.extend(general.countries().into_iter().map(Some));
        for scope in scopes {
            let get = |metric| match &scope {
                None => general.world(metric).unwrap().to_vec(),
                Some(c) => general.country(metric, c).unwrap().to_vec(),
            };
            let (c, d, r, a) = (
                get(Metric::Confirmed),
                get(Metric::Deaths),
                get(Metric::Recovered),
                get(Metric::Active),
            );
            for i in 0..general.dates().len() {
                assert_eq!(a[i].unwrap(), c[i].unwrap() - r[i].unwrap() - d[i].unwrap());
            }
        }
    }

    #[test]
    fn death_outcome_is_null_without_outcomes() {
        let general = aggregate_general(&sample_tables()).unwrap();
        let italy = general.country(Metric::DeathOutcome, "Italy").unwrap();
        assert_eq!(italy[0], None);
        assert_eq!(italy[1], Some(25.0));
        assert_eq!(italy[2], Some(40.0));
        assert_eq!(general.world(Metric::DeathOutcome).unwrap()[0], None);
    }

    #[test]
    fn active_is_not_clamped() {
        assert_eq!(active(10.0, 4.0, 8.0), -2.0);
    }

    #[test]
    fn ratio_helper() {
        assert_eq!(death_outcome_ratio(0.0, 0.0), None);
        assert_eq!(death_outcome_ratio(1.0, 3.0), Some(25.0));
        assert_eq!(death_outcome_ratio(2.0, 0.0), Some(100.0));
    }

    #[test]
    fn labels_are_day_first() {
        let general = aggregate_general(&sample_tables()).unwrap();
        assert_eq!(
            general.date_labels(),
            vec!["22/01/2020", "23/01/2020", "24/01/2020"]
        );
    }

    #[test]
    fn country_missing_from_a_source_has_no_derived_series() {
        let mut tables = sample_tables();
        tables.recovered = table(",Italy,41.8,12.5,0,3,6\n");
        let general = aggregate_general(&tables).unwrap();
        assert!(general.country(Metric::Confirmed, "China").is_some());
        assert!(general.country(Metric::Active, "China").is_none());
        assert!(general.country(Metric::Active, "Italy").is_some());
    }

    #[test]
    fn mismatched_date_columns_fail() {
        let mut tables = sample_tables();
        tables.deaths = TimeSeriesTable::parse_csv(
            "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20\n,Italy,41.8,12.5,0,1\n",
        )
        .unwrap();
        let err = aggregate_general(&tables).unwrap_err();
        assert!(err.to_string().contains("Deaths"));
    }
}
