use crate::format::{format_number, format_with_unit};
use crate::models::HabitType;
use chrono::NaiveDate;

const DIGITS: usize = 2;

/// Short status for a value, marked done/in progress when a target exists.
pub fn describe_value(value: Option<f64>, target: Option<f64>, unit: Option<&str>) -> String {
    let Some(value) = value else {
        return "No data".to_string();
    };
    match target.filter(|target| *target > 0.0) {
        None => format_with_unit(value, unit, DIGITS),
        Some(target) => {
            let marker = if value >= target { "✓" } else { "…" };
            format!("{marker} {}", format_with_unit(value, unit, DIGITS))
        }
    }
}

/// `value / target` progress, e.g. `5 / 10`.
pub fn describe_ratio(value: Option<f64>, target: Option<f64>) -> String {
    let Some(value) = value else {
        return "No data".to_string();
    };
    match target.filter(|target| *target > 0.0) {
        None => format_number(value, DIGITS),
        Some(target) => format!(
            "{} / {}",
            format_number(value, DIGITS),
            format_number(target, DIGITS)
        ),
    }
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn cell_tooltip(
    kind: HabitType,
    value: Option<f64>,
    target: Option<f64>,
    unit: Option<&str>,
    date: NaiveDate,
) -> String {
    let status = match kind {
        HabitType::Boolean => match value {
            Some(value) if value > 0.0 => "Completed".to_string(),
            _ => "No data".to_string(),
        },
        HabitType::Counter => describe_value(value, target, unit),
    };
    format!("{status} on {}", long_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_value_reads_no_data() {
        assert_eq!(describe_value(None, Some(10.0), Some("km")), "No data");
        assert_eq!(describe_ratio(None, Some(10.0)), "No data");
    }

    #[test]
    fn zero_or_missing_target_prints_plain_value() {
        assert_eq!(describe_value(Some(4.0), None, Some("km")), "4 km");
        assert_eq!(describe_value(Some(4.5), Some(0.0), None), "4.50");
    }

    #[test]
    fn target_adds_progress_marker() {
        assert_eq!(describe_value(Some(10.0), Some(10.0), Some("min")), "✓ 10 min");
        assert_eq!(describe_value(Some(3.0), Some(10.0), None), "… 3");
        assert_eq!(describe_ratio(Some(5.0), Some(10.0)), "5 / 10");
    }

    #[test]
    fn tooltips_include_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        assert_eq!(
            cell_tooltip(HabitType::Boolean, Some(1.0), None, None, date),
            "Completed on October 9, 2026"
        );
        assert_eq!(
            cell_tooltip(HabitType::Boolean, Some(0.0), None, None, date),
            "No data on October 9, 2026"
        );
        assert_eq!(
            cell_tooltip(HabitType::Counter, Some(6.0), Some(8.0), Some("pages"), date),
            "… 6 pages on October 9, 2026"
        );
    }
}
