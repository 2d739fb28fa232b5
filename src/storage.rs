use crate::errors::AppError;
use crate::models::{Change, HabitType, Overlay, OverlayChanges, WeekStart};
use crate::scheme::ColorScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

const COLOR_SCHEME: &str = "colorScheme";
const METRIC: &str = "metric";
const WEEK_START: &str = "weekStart";

/// Flat string key/value store for per-habit display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct PreferenceStore {
    entries: BTreeMap<String, String>,
}

pub fn preference_key(habit_id: &str, field: &str) -> String {
    format!("habit_{habit_id}_{field}")
}

impl PreferenceStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads the overlay for a habit. Unrecognized values are ignored.
    pub fn overlay(&self, habit_id: &str, kind: HabitType) -> Overlay {
        let color_scheme = self
            .get(&preference_key(habit_id, COLOR_SCHEME))
            .and_then(|raw| {
                let parsed = ColorScheme::parse(raw);
                if parsed.is_none() {
                    warn!(habit_id, value = raw, "ignoring unknown color scheme");
                }
                parsed
            });
        let metric = match kind {
            HabitType::Counter => self
                .get(&preference_key(habit_id, METRIC))
                .filter(|metric| !metric.trim().is_empty())
                .map(str::to_string),
            HabitType::Boolean => None,
        };
        let week_start = self
            .get(&preference_key(habit_id, WEEK_START))
            .and_then(WeekStart::parse);

        Overlay {
            color_scheme,
            metric,
            week_start,
        }
    }

    pub fn apply(&mut self, habit_id: &str, kind: HabitType, changes: OverlayChanges) {
        self.apply_field(
            preference_key(habit_id, COLOR_SCHEME),
            changes.color_scheme.map(|scheme| scheme.name().to_string()),
        );
        if kind == HabitType::Counter {
            self.apply_field(preference_key(habit_id, METRIC), changes.metric);
        }
        self.apply_field(
            preference_key(habit_id, WEEK_START),
            changes.week_start.map(|start| start.as_str().to_string()),
        );
    }

    pub fn clear_habit(&mut self, habit_id: &str) {
        for field in [COLOR_SCHEME, METRIC, WEEK_START] {
            self.remove(&preference_key(habit_id, field));
        }
    }

    fn apply_field(&mut self, key: String, change: Change<String>) {
        match change {
            Change::Keep => {}
            Change::Set(value) => self.set(key, value),
            Change::Clear => self.remove(&key),
        }
    }
}

pub async fn load_preferences(path: &Path) -> PreferenceStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                PreferenceStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PreferenceStore::default(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            PreferenceStore::default()
        }
    }
}

pub async fn persist_preferences(path: &Path, store: &PreferenceStore) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
