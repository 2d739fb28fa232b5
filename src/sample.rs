//! Synthetic completion data for the new-habit preview.
//!
//! Output is unseeded and must never be merged into tracked data.

use crate::heatmap::grid::Window;
use crate::models::{Habit, HabitType, date_key};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use rand::Rng;
use std::collections::BTreeMap;

/// Scale used for counter previews without a usable target.
pub const DEFAULT_COUNTER_SCALE: u32 = 10;

pub const PREVIEW_PREFIX: &str = "preview-";

const BASE_PROBABILITY: f64 = 0.7;
const STREAK_PROBABILITY: f64 = 0.3;
const STREAK_ONE_PROBABILITY: f64 = 0.7;
const MIN_STREAK: usize = 2;
const MAX_STREAK: usize = 6;
const PERFECT_DAY_PROBABILITY: f64 = 0.1;
const ZERO_DAY_PROBABILITY: f64 = 0.05;

pub fn generate_sample_data(
    kind: HabitType,
    start: NaiveDate,
    end: NaiveDate,
    target: Option<f64>,
) -> BTreeMap<NaiveDate, f64> {
    generate_sample_data_with(&mut rand::thread_rng(), kind, start, end, target)
}

pub fn generate_sample_data_with<R: Rng + ?Sized>(
    rng: &mut R,
    kind: HabitType,
    start: NaiveDate,
    end: NaiveDate,
    target: Option<f64>,
) -> BTreeMap<NaiveDate, f64> {
    let scale = counter_scale(target);
    let mut days: Vec<(NaiveDate, f64)> = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let value = match kind {
                HabitType::Boolean => boolean_day(rng, date),
                HabitType::Counter => counter_day(rng, date, scale),
            };
            (date, value)
        })
        .collect();

    inject_streaks(rng, kind, scale, &mut days);
    days.into_iter().collect()
}

fn counter_scale(target: Option<f64>) -> u32 {
    target
        .filter(|target| target.is_finite() && *target > 0.0)
        .map(|target| target.floor().min(f64::from(u32::MAX)) as u32)
        .unwrap_or(DEFAULT_COUNTER_SCALE)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn boolean_day<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> f64 {
    let mut probability = BASE_PROBABILITY;
    if is_weekend(date) {
        probability -= 0.2;
    }
    match date.month() {
        3..=5 => probability += 0.1,
        12 | 1 | 2 => probability -= 0.1,
        _ => {}
    }
    if date.day() <= 5 {
        probability += 0.1;
    }
    let probability = probability.clamp(0.0, 1.0);
    if rng.gen_bool(probability) { 1.0 } else { 0.0 }
}

fn counter_day<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate, scale: u32) -> f64 {
    let scale_f = f64::from(scale);
    let mut value = if is_weekend(date) {
        let high = (scale_f * 0.5).floor() as u32;
        rng.gen_range(0..=high)
    } else {
        let low = (scale_f * 0.4).ceil() as u32;
        rng.gen_range(low..=scale)
    };

    if (6..=8).contains(&date.month()) {
        let bonus = (scale_f * 0.2).round() as u32;
        value = value.saturating_add(bonus).min(scale);
    }
    if rng.gen_bool(PERFECT_DAY_PROBABILITY) {
        value = scale;
    }
    if rng.gen_bool(ZERO_DAY_PROBABILITY) {
        value = 0;
    }
    f64::from(value)
}

/// Overwrites random runs of 2..=6 days with one repeated value.
fn inject_streaks<R: Rng + ?Sized>(
    rng: &mut R,
    kind: HabitType,
    scale: u32,
    days: &mut [(NaiveDate, f64)],
) {
    let mut index = 0;
    while index + 1 < days.len() {
        if !rng.gen_bool(STREAK_PROBABILITY) {
            index += 1;
            continue;
        }
        let length = rng.gen_range(MIN_STREAK..=MAX_STREAK);
        let value = match kind {
            HabitType::Boolean => {
                if rng.gen_bool(STREAK_ONE_PROBABILITY) { 1.0 } else { 0.0 }
            }
            HabitType::Counter => f64::from(rng.gen_range(0..=scale)),
        };
        let stop = (index + length).min(days.len());
        for day in &mut days[index..stop] {
            day.1 = value;
        }
        index += length;
    }
}

/// Stand-in habit shown on the new-habit page before anything exists.
pub fn preview_habit(kind: HabitType, color: &str, target: Option<f64>) -> Habit {
    let today = Local::now().date_naive();
    let (start, end) = Window::default().bounds(today);
    let target = Some(f64::from(counter_scale(target)));
    let completed_dates = generate_sample_data(kind, start, end, target)
        .into_iter()
        .map(|(date, value)| (date_key(date), value))
        .collect();

    Habit {
        id: format!("{PREVIEW_PREFIX}{}-habit", kind.as_str()),
        name: "Preview Habit".to_string(),
        kind,
        color: color.to_string(),
        target_counter: match kind {
            HabitType::Counter => target,
            HabitType::Boolean => None,
        },
        completed_dates,
        created_at: Some(Local::now().to_rfc3339()),
        user_id: Some("preview-user".to_string()),
        current_streak: 14,
        longest_streak: 20,
    }
}

pub fn is_preview_id(id: &str) -> bool {
    id.starts_with(PREVIEW_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn boolean_values_are_zero_or_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_sample_data_with(
            &mut rng,
            HabitType::Boolean,
            day(2025, 1, 1),
            day(2026, 12, 31),
            None,
        );
        assert_eq!(data.len(), 730);
        assert!(data.values().all(|v| *v == 0.0 || *v == 1.0));
    }

    #[test]
    fn counter_values_stay_within_target() {
        for (seed, target) in [(1, 10.0), (2, 3.0), (3, 1.0), (4, 25.0), (5, 2.5), (6, 0.5)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let data = generate_sample_data_with(
                &mut rng,
                HabitType::Counter,
                day(2026, 1, 1),
                day(2026, 12, 31),
                Some(target),
            );
            assert!(data.values().all(|v| *v >= 0.0 && *v <= target && v.fract() == 0.0));
        }
    }

    #[test]
    fn counter_without_target_uses_default_scale() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = generate_sample_data_with(
            &mut rng,
            HabitType::Counter,
            day(2026, 1, 1),
            day(2026, 6, 30),
            Some(0.0),
        );
        let max = f64::from(DEFAULT_COUNTER_SCALE);
        assert!(data.values().all(|v| *v >= 0.0 && *v <= max));
    }

    #[test]
    fn one_value_per_day_in_range() {
        let data =
            generate_sample_data(HabitType::Counter, day(2026, 2, 1), day(2026, 2, 28), Some(5.0));
        assert_eq!(data.len(), 28);
        assert_eq!(data.keys().next(), Some(&day(2026, 2, 1)));
        assert_eq!(data.keys().last(), Some(&day(2026, 2, 28)));
    }

    #[test]
    fn empty_range_yields_nothing() {
        let data =
            generate_sample_data(HabitType::Boolean, day(2026, 3, 2), day(2026, 3, 1), None);
        assert!(data.is_empty());
    }

    #[test]
    fn preview_habits_use_reserved_ids() {
        let habit = preview_habit(HabitType::Counter, "#64b5f6", Some(8.0));
        assert_eq!(habit.id, "preview-counter-habit");
        assert!(is_preview_id(&habit.id));
        assert_eq!(habit.target_counter, Some(8.0));
        assert_eq!(habit.completed_dates.len(), 366);

        let habit = preview_habit(HabitType::Boolean, "#64b5f6", None);
        assert_eq!(habit.id, "preview-boolean-habit");
        assert_eq!(habit.target_counter, None);
    }
}
