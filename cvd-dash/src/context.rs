//! Application object shared by all handlers.
//!
//! The [`Dashboard`] tables are read-only after startup and need no locking.
//! The selection and its store sit behind one mutex: a selection change is
//! read-modify-save under the lock, so concurrent handlers serialize and the
//! last writer wins.

use crate::dashboard::Dashboard;
use crate::series::{ChartPayload, GENERAL_PROMPT};
use crate::state::{SelectionState, StateStore};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Session {
    selection: SelectionState,
    store: StateStore,
}

pub struct AppContext {
    dashboard: Dashboard,
    session: Mutex<Session>,
}

impl AppContext {
    /// Build the context, restoring the last selection from `store`.
    pub fn new(dashboard: Dashboard, store: StateStore) -> Self {
        let selection = store.load();
        log::info!(
            "Restored selection from {}: {:?}",
            store.path().display(),
            selection
        );
        Self {
            dashboard,
            session: Mutex::new(Session { selection, store }),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn selection(&self) -> SelectionState {
        self.session().selection.clone()
    }

    /// "By Countries" selection changed: build its chart and persist.
    pub fn select_by_country(&self, countries: Vec<String>) -> ChartPayload {
        let chart = self.dashboard.build_by_country_series(&countries);
        let mut session = self.session();
        session.selection.by_country = countries;
        Self::persist(&session);
        chart
    }

    /// "General" selection changed: build its chart and persist.
    pub fn select_general(&self, metrics: Vec<String>, countries: Vec<String>) -> ChartPayload {
        let chart = self.dashboard.build_general_series(&metrics, &countries);
        let mut session = self.session();
        session.selection.general.metrics = metrics;
        session.selection.general.countries = countries;
        Self::persist(&session);
        chart
    }

    /// By-country chart for the current selection, without persisting.
    pub fn current_by_country(&self) -> ChartPayload {
        let countries = self.selection().by_country;
        self.dashboard.build_by_country_series(&countries)
    }

    /// General chart for the current selection; the prompt when no metric is selected.
    pub fn current_general(&self) -> ChartPayload {
        let general = self.selection().general;
        if general.metrics.is_empty() {
            ChartPayload::empty(GENERAL_PROMPT)
        } else {
            self.dashboard
                .build_general_series(&general.metrics, &general.countries)
        }
    }

    fn persist(session: &Session) {
        if let Err(e) = session.store.save(&session.selection) {
            log::warn!("Selection not saved: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::sample_dashboard;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn starts_from_persisted_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let saved = SelectionState {
            by_country: strings(&["Spain"]),
            ..Default::default()
        };
        store.save(&saved).unwrap();

        let ctx = AppContext::new(sample_dashboard(), store);
        assert_eq!(ctx.selection(), saved);
        assert_eq!(ctx.current_by_country().data.len(), 1);
        assert_eq!(ctx.current_general().layout.title, GENERAL_PROMPT);
    }

    #[test]
    fn selection_changes_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let ctx = AppContext::new(sample_dashboard(), StateStore::new(&path));

        let chart = ctx.select_by_country(strings(&["Italy"]));
        assert_eq!(chart.data.len(), 1);
        let chart = ctx.select_general(strings(&["Confirmed"]), strings(&["Total", "Spain"]));
        assert_eq!(chart.data.len(), 2);

        let reloaded = StateStore::new(&path).load();
        assert_eq!(reloaded.by_country, vec!["Italy"]);
        assert_eq!(reloaded.general.metrics, vec!["Confirmed"]);
        assert_eq!(reloaded.general.countries, vec!["Total", "Spain"]);
        assert_eq!(ctx.current_general().data.len(), 2);
    }

    #[test]
    fn unsaveable_state_still_returns_chart() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("missing-dir").join("state.json"));
        let ctx = AppContext::new(sample_dashboard(), store);
        let chart = ctx.select_by_country(strings(&["Spain"]));
        assert_eq!(chart.data.len(), 1);
        assert_eq!(ctx.selection().by_country, vec!["Spain"]);
    }
}
