//! Incoming form and JSON payloads, and their validation into service calls.

use crate::errors::AppError;
use crate::format::parse_number_input;
use crate::models::{
    Change, CreateHabit, ExtendedHabit, HabitColor, HabitType, Overlay, OverlayChanges,
    UpdateHabit, WeekStart,
};
use crate::sample::preview_habit;
use crate::scheme::ColorScheme;
use crate::stats::completion_rates;
use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer};

/// Banner shown after a redirect, carried as `?toast=<slug>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    Created,
    Updated,
    Deleted,
    MissingFields,
    InvalidTarget,
    InvalidDate,
    NotAuthenticated,
    ServiceError,
}

impl Toast {
    const ALL: [Toast; 8] = [
        Toast::Created,
        Toast::Updated,
        Toast::Deleted,
        Toast::MissingFields,
        Toast::InvalidTarget,
        Toast::InvalidDate,
        Toast::NotAuthenticated,
        Toast::ServiceError,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Toast::Created => "created",
            Toast::Updated => "updated",
            Toast::Deleted => "deleted",
            Toast::MissingFields => "missing-fields",
            Toast::InvalidTarget => "invalid-target",
            Toast::InvalidDate => "invalid-date",
            Toast::NotAuthenticated => "not-authenticated",
            Toast::ServiceError => "service-error",
        }
    }

    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|toast| toast.slug() == slug.trim())
    }

    pub fn message(self) -> &'static str {
        match self {
            Toast::Created => "Habit created successfully!",
            Toast::Updated => "Habit updated.",
            Toast::Deleted => "Habit deleted.",
            Toast::MissingFields => "Please fill in all required fields.",
            Toast::InvalidTarget => "Please set a valid target for counter habits.",
            Toast::InvalidDate => "Dates must look like YYYY-MM-DD.",
            Toast::NotAuthenticated => "Not authenticated.",
            Toast::ServiceError => "The habit service could not complete the request.",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Toast::Created | Toast::Updated | Toast::Deleted)
    }

    pub fn redirect_to(self, path: &str) -> String {
        format!("{path}?toast={}", self.slug())
    }
}

impl From<Toast> for AppError {
    fn from(toast: Toast) -> Self {
        AppError::bad_request(toast.message())
    }
}

/// Validated creation: the service payload plus local-only preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub payload: CreateHabit,
    pub overlay: OverlayChanges,
}

pub fn random_color() -> HabitColor {
    HabitColor::ALL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(HabitColor::Green)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate_new(
    name: &str,
    color: &str,
    kind: HabitType,
    target: Option<f64>,
    overlay: OverlayChanges,
) -> Result<NewHabit, Toast> {
    let (Some(name), Some(color)) = (non_blank(name), non_blank(color)) else {
        return Err(Toast::MissingFields);
    };
    let target_counter = match kind {
        HabitType::Counter => match target {
            Some(target) if target > 0.0 => Some(target),
            _ => return Err(Toast::InvalidTarget),
        },
        HabitType::Boolean => None,
    };

    Ok(NewHabit {
        payload: CreateHabit {
            name,
            color,
            kind,
            target_counter,
        },
        overlay,
    })
}

/// New-habit form. Also used as the query string that pre-fills it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HabitForm {
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub metric: String,
    pub week_start: String,
    pub color_scheme: String,
}

impl HabitForm {
    pub fn habit_type(&self) -> HabitType {
        HabitType::parse(&self.kind).unwrap_or_default()
    }

    pub fn target_value(&self) -> Option<f64> {
        non_blank(&self.target).map(|raw| parse_number_input(&raw))
    }

    pub fn overlay_changes(&self) -> OverlayChanges {
        OverlayChanges {
            color_scheme: Change::set_if(ColorScheme::parse(&self.color_scheme)),
            metric: Change::set_if(non_blank(&self.metric)),
            week_start: Change::set_if(WeekStart::parse(&self.week_start)),
        }
    }

    pub fn validate(&self) -> Result<NewHabit, Toast> {
        validate_new(
            &self.name,
            &self.color,
            self.habit_type(),
            self.target_value(),
            self.overlay_changes(),
        )
    }

    /// Synthetic habit showing what the form would produce. Never persisted.
    pub fn preview(&self) -> ExtendedHabit {
        let kind = self.habit_type();
        let color = non_blank(&self.color).unwrap_or_else(|| random_color().hex().to_string());
        let habit = preview_habit(kind, &color, self.target_value());
        let overlay = Overlay {
            color_scheme: ColorScheme::parse(&self.color_scheme),
            metric: match kind {
                HabitType::Counter => non_blank(&self.metric),
                HabitType::Boolean => None,
            },
            week_start: WeekStart::parse(&self.week_start),
        };
        let completion = completion_rates(&habit);
        ExtendedHabit {
            habit,
            overlay,
            completion,
        }
    }
}

/// Edit form. Empty scheme or metric fields clear the stored preference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    pub name: String,
    pub color: String,
    pub metric: String,
    pub week_start: String,
    pub color_scheme: String,
}

impl EditForm {
    pub fn validate(&self) -> Result<(UpdateHabit, OverlayChanges), Toast> {
        let (Some(name), Some(color)) = (non_blank(&self.name), non_blank(&self.color)) else {
            return Err(Toast::MissingFields);
        };
        let color_scheme = if self.color_scheme.trim().is_empty() {
            Change::Clear
        } else {
            Change::set_if(ColorScheme::parse(&self.color_scheme))
        };
        let metric = match non_blank(&self.metric) {
            Some(metric) => Change::Set(metric),
            None => Change::Clear,
        };

        Ok((
            UpdateHabit {
                name: Some(name),
                color: Some(color),
            },
            OverlayChanges {
                color_scheme,
                metric,
                week_start: Change::set_if(WeekStart::parse(&self.week_start)),
            },
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackForm {
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToastQuery {
    pub toast: Option<String>,
}

impl ToastQuery {
    pub fn toast(&self) -> Option<Toast> {
        self.toast.as_deref().and_then(Toast::parse)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WindowQuery {
    pub window: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub kind: HabitType,
    #[serde(default)]
    pub target_counter: Option<f64>,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub week_start: Option<String>,
}

impl CreateHabitRequest {
    pub fn validate(&self) -> Result<NewHabit, AppError> {
        let color_scheme = parse_scheme(self.color_scheme.as_deref())?;
        let overlay = OverlayChanges {
            color_scheme: Change::set_if(color_scheme),
            metric: Change::set_if(self.metric.as_deref().and_then(non_blank)),
            week_start: Change::set_if(self.week_start.as_deref().and_then(WeekStart::parse)),
        };
        Ok(validate_new(
            &self.name,
            &self.color,
            self.kind,
            self.target_counter,
            overlay,
        )?)
    }
}

/// JSON update. `null` for `colorScheme` or `metric` clears the preference; absence keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub color_scheme: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub metric: Option<Option<String>>,
    #[serde(default)]
    pub week_start: Option<String>,
}

impl UpdateHabitRequest {
    pub fn validate(&self) -> Result<(UpdateHabit, OverlayChanges), AppError> {
        let name = match self.name.as_deref() {
            Some(name) => Some(non_blank(name).ok_or(Toast::MissingFields)?),
            None => None,
        };
        let color = match self.color.as_deref() {
            Some(color) => Some(non_blank(color).ok_or(Toast::MissingFields)?),
            None => None,
        };
        let color_scheme = match &self.color_scheme {
            None => Change::Keep,
            Some(None) => Change::Clear,
            Some(Some(name)) => match parse_scheme(Some(name))? {
                Some(scheme) => Change::Set(scheme),
                None => Change::Clear,
            },
        };
        let metric = match &self.metric {
            None => Change::Keep,
            Some(value) => match value.as_deref().and_then(non_blank) {
                Some(metric) => Change::Set(metric),
                None => Change::Clear,
            },
        };

        Ok((
            UpdateHabit { name, color },
            OverlayChanges {
                color_scheme,
                metric,
                week_start: Change::set_if(self.week_start.as_deref().and_then(WeekStart::parse)),
            },
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackRequestBody {
    pub date: String,
}

fn parse_scheme(raw: Option<&str>) -> Result<Option<ColorScheme>, AppError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(name) => ColorScheme::parse(name)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("unknown color scheme '{name}'"))),
    }
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
