//! Persisted UI selection.
//!
//! The file keeps the layout existing dashboards already wrote:
//!
//! ```json
//! {"countries": ["Italy"], "types": {"types": ["Confirmed"], "countries": ["Total"]}}
//! ```

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Last selection of both chart panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Countries of the "By Countries" panel.
    #[serde(rename = "countries", default, deserialize_with = "nullable_list")]
    pub by_country: Vec<String>,
    /// Metrics and countries of the "General" panel.
    #[serde(rename = "types", default, deserialize_with = "nullable_general")]
    pub general: GeneralSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralSelection {
    #[serde(rename = "types", default, deserialize_with = "nullable_list")]
    pub metrics: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub countries: Vec<String>,
}

// A cleared multi-select used to be written as `null`.
fn nullable_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

fn nullable_general<'de, D: Deserializer<'de>>(d: D) -> Result<GeneralSelection, D::Error> {
    Ok(Option::<GeneralSelection>::deserialize(d)?.unwrap_or_default())
}

/// JSON file holding the [`SelectionState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted selection. Any failure yields the default state.
    pub fn load(&self) -> SelectionState {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) => {
                log::debug!("No selection state at {}: {}", self.path.display(), e);
                return SelectionState::default();
            }
        };
        match serde_json::from_str(&body) {
            Ok(state) => state,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable selection state {}: {}",
                    self.path.display(),
                    e
                );
                SelectionState::default()
            }
        }
    }

    /// Overwrite the persisted selection.
    pub fn save(&self, state: &SelectionState) -> anyhow::Result<()> {
        let body = serde_json::to_string(state)?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("cannot write selection state {}", self.path.display()))
    }
}
