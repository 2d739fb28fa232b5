use super::grid::GridLayout;
use crate::models::WeekStart;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const MAX_MONTH_BOUNDARIES: usize = 12;

/// Columns a month abbreviation needs before the next label can start.
const MIN_LABEL_GAP: u32 = 2;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub column: u32,
    pub label: String,
}

/// Column 0 carries the (possibly partial) first month, then one label per month boundary.
/// A boundary too close to the partial first label replaces it.
pub fn month_labels(layout: &GridLayout) -> Vec<MonthLabel> {
    let start = layout.start();
    let mut labels = vec![MonthLabel {
        column: 0,
        label: month_abbrev(start),
    }];

    let mut next = first_of_next_month(start);
    let mut placed = 0;
    while let Some(boundary) = next {
        if placed == MAX_MONTH_BOUNDARIES {
            break;
        }
        let Some(pos) = layout.position(boundary) else {
            break;
        };
        let crowded = labels
            .last()
            .is_some_and(|last| pos.column < last.column + MIN_LABEL_GAP);
        if crowded && placed == 0 {
            labels.pop();
        }
        if !crowded || placed == 0 {
            labels.push(MonthLabel {
                column: pos.column,
                label: month_abbrev(boundary),
            });
        }
        placed += 1;
        next = first_of_next_month(boundary);
    }

    labels
}

/// Weekday names rotated to the week start; only every other row is labeled.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    let shift = week_start.index() as usize;
    let mut labels = [""; 7];
    for (row, label) in labels.iter_mut().enumerate() {
        if row % 2 == 1 {
            *label = WEEKDAYS[(row + shift) % 7];
        }
    }
    labels
}

fn month_abbrev(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_year_gets_twelve_labels() {
        let layout = GridLayout::from_bounds(day(2026, 1, 1), day(2026, 12, 31), WeekStart::Sunday);
        let labels = month_labels(&layout);
        let names: Vec<_> = labels.iter().map(|label| label.label.as_str()).collect();
        assert_eq!(
            names,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert_eq!(labels[0].column, 0);
        // 2026-01-01 is a Thursday, Feb 1 is index 31 + 4.
        assert_eq!(labels[1].column, 5);
    }

    #[test]
    fn partial_first_month_is_not_repeated() {
        let layout = GridLayout::from_bounds(day(2026, 3, 20), day(2026, 5, 10), WeekStart::Monday);
        let labels = month_labels(&layout);
        let names: Vec<_> = labels.iter().map(|label| label.label.as_str()).collect();
        assert_eq!(names, ["Mar", "Apr", "May"]);
        assert_eq!(labels[0].column, 0);
        assert!(labels.windows(2).all(|pair| pair[0].column < pair[1].column));
    }

    #[test]
    fn trailing_window_places_at_most_twelve_boundaries() {
        // 2025-10-01 is a Wednesday, so Nov 1 lands in column 4.
        let layout =
            GridLayout::from_bounds(day(2025, 10, 1), day(2026, 10, 1), WeekStart::Sunday);
        let labels = month_labels(&layout);
        assert_eq!(labels.len(), 13);
        assert_eq!(labels[0].label, "Oct");
        assert_eq!(labels[1].label, "Nov");
        assert_eq!(labels[1].column, 4);
        assert_eq!(labels[12].label, "Oct");
    }

    #[test]
    fn boundary_in_first_column_replaces_partial_month() {
        // 2026-03-31 is a Tuesday, so Apr 1 shares column 0 with it.
        let layout =
            GridLayout::from_bounds(day(2026, 3, 31), day(2026, 6, 30), WeekStart::Sunday);
        let labels = month_labels(&layout);
        let names: Vec<_> = labels.iter().map(|label| label.label.as_str()).collect();
        assert_eq!(names, ["Apr", "May", "Jun"]);
        assert_eq!(labels[0].column, 0);
        assert!(labels.windows(2).all(|pair| pair[0].column < pair[1].column));
    }

    #[test]
    fn boundary_in_second_column_replaces_partial_month() {
        // 2025-10-19 is a Sunday, so Nov 1 lands in column 1.
        let layout =
            GridLayout::from_bounds(day(2025, 10, 19), day(2026, 10, 19), WeekStart::Sunday);
        let labels = month_labels(&layout);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].label, "Nov");
        assert_eq!(labels[0].column, 1);
        assert_eq!(labels[11].label, "Oct");
        assert!(labels.windows(2).all(|pair| pair[1].column >= pair[0].column + 2));
    }

    #[test]
    fn weekday_labels_follow_week_start() {
        assert_eq!(weekday_labels(WeekStart::Sunday), ["", "Mon", "", "Wed", "", "Fri", ""]);
        assert_eq!(weekday_labels(WeekStart::Monday), ["", "Tue", "", "Thu", "", "Sat", ""]);
    }
}
