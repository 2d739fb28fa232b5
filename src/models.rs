use crate::scheme::ColorScheme;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    #[default]
    Boolean,
    Counter,
}

impl HabitType {
    pub fn as_str(self) -> &'static str {
        match self {
            HabitType::Boolean => "boolean",
            HabitType::Counter => "counter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "boolean" => Some(HabitType::Boolean),
            "counter" => Some(HabitType::Counter),
            _ => None,
        }
    }
}

/// Palette offered by the habit form. The service may still hand back any hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Teal,
}

impl HabitColor {
    pub const ALL: [HabitColor; 8] = [
        HabitColor::Red,
        HabitColor::Blue,
        HabitColor::Green,
        HabitColor::Yellow,
        HabitColor::Purple,
        HabitColor::Orange,
        HabitColor::Pink,
        HabitColor::Teal,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            HabitColor::Red => "#e57373",
            HabitColor::Blue => "#64b5f6",
            HabitColor::Green => "#81c784",
            HabitColor::Yellow => "#ffd54f",
            HabitColor::Purple => "#ba68c8",
            HabitColor::Orange => "#ffb74d",
            HabitColor::Pink => "#f06292",
            HabitColor::Teal => "#4db6ac",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HabitColor::Red => "Red",
            HabitColor::Blue => "Blue",
            HabitColor::Green => "Green",
            HabitColor::Yellow => "Yellow",
            HabitColor::Purple => "Purple",
            HabitColor::Orange => "Orange",
            HabitColor::Pink => "Pink",
            HabitColor::Teal => "Teal",
        }
    }

    pub fn from_hex(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Raw weekday index counted from Sunday.
    pub fn index(self) -> u32 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekStart::Sunday => "Sunday",
            WeekStart::Monday => "Monday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Sunday" => Some(WeekStart::Sunday),
            "Monday" => Some(WeekStart::Monday),
            _ => None,
        }
    }
}

/// Habit record as owned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: HabitType,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_counter: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_completions")]
    pub completed_dates: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

impl Habit {
    /// Positive target, if one is configured.
    pub fn target(&self) -> Option<f64> {
        self.target_counter.filter(|target| *target > 0.0)
    }

    /// Completion values keyed by calendar date. Keys that are not ISO dates are skipped.
    pub fn series(&self) -> BTreeMap<NaiveDate, f64> {
        self.completed_dates
            .iter()
            .filter_map(|(key, value)| parse_date_key(key).map(|date| (date, *value)))
            .collect()
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.completed_dates.get(&date_key(date)).copied()
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        let Some(value) = self.value_on(date) else {
            return false;
        };
        match (self.kind, self.target()) {
            (HabitType::Counter, Some(target)) => value >= target,
            _ => value > 0.0,
        }
    }

    /// Distinct years present in the data, newest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.series().keys().map(|date| date.year()).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let day = key.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompletionValue {
    Flag(bool),
    Count(f64),
}

fn deserialize_completions<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, CompletionValue>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(date, value)| {
            let value = match value {
                CompletionValue::Flag(done) => f64::from(u8::from(done)),
                CompletionValue::Count(count) => count,
            };
            (date, value)
        })
        .collect())
}

/// Body of `POST /habits` on the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabit {
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: HabitType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_counter: Option<f64>,
}

/// Body of `PATCH /habits/{id}`; the service accepts only these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRequest {
    pub date: String,
}

/// Client-only display preferences for one habit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<WeekStart>,
}

/// How an overlay field changes on write.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Change<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T> Change<T> {
    /// `Some` sets, `None` keeps.
    pub fn set_if(value: Option<T>) -> Self {
        value.map_or(Change::Keep, Change::Set)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Change<U> {
        match self {
            Change::Keep => Change::Keep,
            Change::Set(value) => Change::Set(f(value)),
            Change::Clear => Change::Clear,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayChanges {
    pub color_scheme: Change<ColorScheme>,
    pub metric: Change<String>,
    pub week_start: Change<WeekStart>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRates {
    pub completion_rate_7_days: f64,
    pub completion_rate_month: f64,
    pub completion_rate_year: f64,
}

/// Server record combined with its local overlay at read time.
#[derive(Debug, Clone, Serialize)]
pub struct ExtendedHabit {
    #[serde(flatten)]
    pub habit: Habit,
    #[serde(flatten)]
    pub overlay: Overlay,
    #[serde(flatten)]
    pub completion: CompletionRates,
}

impl ExtendedHabit {
    pub fn week_start(&self) -> WeekStart {
        self.overlay.week_start.unwrap_or_default()
    }

    pub fn unit(&self) -> Option<&str> {
        match self.habit.kind {
            HabitType::Counter => self.overlay.metric.as_deref(),
            HabitType::Boolean => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_decodes_service_payload() {
        let habit: Habit = serde_json::from_value(serde_json::json!({
            "_id": "h1",
            "name": "Run",
            "type": "counter",
            "color": "#64b5f6",
            "targetCounter": 10,
            "completedDates": { "2026-01-02": 4, "2026-01-03": true, "2026-01-04": false },
            "createdAt": "2026-01-01T00:00:00Z",
            "userId": "u1",
            "currentStreak": 2,
            "longestStreak": 5
        }))
        .unwrap();

        assert_eq!(habit.kind, HabitType::Counter);
        assert_eq!(habit.target(), Some(10.0));
        assert_eq!(habit.completed_dates.get("2026-01-02"), Some(&4.0));
        assert_eq!(habit.completed_dates.get("2026-01-03"), Some(&1.0));
        assert_eq!(habit.completed_dates.get("2026-01-04"), Some(&0.0));
        assert_eq!(habit.longest_streak, 5);
    }

    #[test]
    fn habit_tolerates_missing_optional_fields() {
        let habit: Habit =
            serde_json::from_value(serde_json::json!({ "_id": "h2", "name": "Read" })).unwrap();
        assert_eq!(habit.kind, HabitType::Boolean);
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.target(), None);
    }

    #[test]
    fn series_skips_malformed_keys_and_accepts_timestamps() {
        let mut habit: Habit =
            serde_json::from_value(serde_json::json!({ "_id": "h3", "name": "Stretch" })).unwrap();
        habit.completed_dates.insert("2026-03-01T08:00:00Z".into(), 1.0);
        habit.completed_dates.insert("yesterday".into(), 1.0);

        let series = habit.series();
        assert_eq!(series.len(), 1);
        assert!(series.contains_key(&NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    }

    #[test]
    fn create_payload_never_carries_overlay_fields() {
        let payload = CreateHabit {
            name: "Walk".into(),
            color: HabitColor::Teal.hex().into(),
            kind: HabitType::Boolean,
            target_counter: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("colorScheme"));
        assert!(!object.contains_key("metric"));
        assert!(!object.contains_key("weekStart"));
        assert_eq!(json["type"], "boolean");
    }

    #[test]
    fn counter_done_only_when_target_reached() {
        let mut habit: Habit = serde_json::from_value(serde_json::json!({
            "_id": "h4", "name": "Pushups", "type": "counter", "targetCounter": 20
        }))
        .unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 5, 5).unwrap();
        habit.completed_dates.insert(date_key(day), 12.0);
        assert!(!habit.is_done_on(day));
        habit.completed_dates.insert(date_key(day), 20.0);
        assert!(habit.is_done_on(day));
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let mut habit: Habit =
            serde_json::from_value(serde_json::json!({ "_id": "h5", "name": "Journal" })).unwrap();
        for key in ["2024-02-01", "2026-01-01", "2024-12-31", "2025-06-15"] {
            habit.completed_dates.insert(key.into(), 1.0);
        }
        assert_eq!(habit.years(), vec![2026, 2025, 2024]);
    }

    #[test]
    fn week_start_parse_is_strict() {
        assert_eq!(WeekStart::parse("Monday"), Some(WeekStart::Monday));
        assert_eq!(WeekStart::parse("monday"), None);
        assert_eq!(WeekStart::default(), WeekStart::Sunday);
    }
}
