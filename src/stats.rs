use crate::models::{CompletionRates, Habit};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn completion_rates(habit: &Habit) -> CompletionRates {
    completion_rates_at(Local::now().date_naive(), habit)
}

/// Share of done days (0.0..=1.0) over the last 7 days, the month so far and the year so far.
pub fn completion_rates_at(today: NaiveDate, habit: &Habit) -> CompletionRates {
    let week_start = today - Duration::days(6);
    let month_start = today.with_day(1).unwrap_or(today);
    let year_start = today.with_ordinal(1).unwrap_or(today);

    CompletionRates {
        completion_rate_7_days: rate(habit, week_start, today),
        completion_rate_month: rate(habit, month_start, today),
        completion_rate_year: rate(habit, year_start, today),
    }
}

fn rate(habit: &Habit, start: NaiveDate, end: NaiveDate) -> f64 {
    let days = (end - start).num_days() + 1;
    if days <= 0 {
        return 0.0;
    }
    let done = start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| habit.is_done_on(*date))
        .count();
    done as f64 / days as f64
}

/// The `count` most recent days ending today, oldest first.
pub fn recent_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect()
}
