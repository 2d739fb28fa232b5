use crate::client::{ClientError, HabitClient};
use crate::errors::AppError;
use crate::heatmap::color::Theme;
use crate::models::{ExtendedHabit, Habit, HabitType, OverlayChanges};
use crate::stats::completion_rates;
use crate::storage::{PreferenceStore, persist_preferences};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub client: HabitClient,
    pub theme: Theme,
    pub prefs_path: PathBuf,
    pub prefs: Arc<Mutex<PreferenceStore>>,
    habits: Arc<Mutex<Option<Vec<Habit>>>>,
}

impl AppState {
    pub fn new(
        client: HabitClient,
        theme: Theme,
        prefs_path: PathBuf,
        prefs: PreferenceStore,
    ) -> Self {
        Self {
            client,
            theme,
            prefs_path,
            prefs: Arc::new(Mutex::new(prefs)),
            habits: Arc::new(Mutex::new(None)),
        }
    }

    /// Habit collection, fetched once and reused until a mutation invalidates it.
    pub async fn habits(&self) -> Result<Vec<Habit>, ClientError> {
        let mut cache = self.habits.lock().await;
        if let Some(habits) = cache.as_ref() {
            return Ok(habits.clone());
        }
        let habits = self.client.list().await?;
        debug!(count = habits.len(), "habit collection refreshed");
        *cache = Some(habits.clone());
        Ok(habits)
    }

    pub async fn invalidate(&self) {
        self.habits.lock().await.take();
    }

    pub async fn extend(&self, habit: Habit) -> ExtendedHabit {
        let overlay = self.prefs.lock().await.overlay(&habit.id, habit.kind);
        let completion = completion_rates(&habit);
        ExtendedHabit {
            habit,
            overlay,
            completion,
        }
    }

    pub async fn extended_habits(&self) -> Result<Vec<ExtendedHabit>, ClientError> {
        let habits = self.habits().await?;
        let mut extended = Vec::with_capacity(habits.len());
        for habit in habits {
            extended.push(self.extend(habit).await);
        }
        Ok(extended)
    }

    pub async fn extended_habit(&self, id: &str) -> Result<ExtendedHabit, ClientError> {
        let habit = self.client.get(id).await?;
        Ok(self.extend(habit).await)
    }

    pub async fn update_preferences(
        &self,
        id: &str,
        kind: HabitType,
        changes: OverlayChanges,
    ) -> Result<(), AppError> {
        self.invalidate().await;
        let mut prefs = self.prefs.lock().await;
        let mut next = prefs.clone();
        next.apply(id, kind, changes);
        persist_preferences(&self.prefs_path, &next).await?;
        *prefs = next;
        Ok(())
    }

    pub async fn clear_preferences(&self, id: &str) -> Result<(), AppError> {
        self.invalidate().await;
        let mut prefs = self.prefs.lock().await;
        let mut next = prefs.clone();
        next.clear_habit(id);
        persist_preferences(&self.prefs_path, &next).await?;
        *prefs = next;
        Ok(())
    }
}
