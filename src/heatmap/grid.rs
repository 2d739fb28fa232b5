use crate::models::WeekStart;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

pub const DEFAULT_TRAILING_DAYS: u32 = 365;

/// Longest trailing window accepted from a query string, about ten years.
pub const MAX_TRAILING_DAYS: u32 = 3660;

/// Date range a heatmap displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// `today - days ..= today`
    Trailing(u32),
    Year(i32),
}

impl Default for Window {
    fn default() -> Self {
        Window::Trailing(DEFAULT_TRAILING_DAYS)
    }
}

impl Window {
    /// Accepts `past-365d`, `Past 365d` or a four digit year.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let lowered = value.to_ascii_lowercase();
        if let Some(days) = lowered
            .strip_prefix("past-")
            .or_else(|| lowered.strip_prefix("past "))
            .and_then(|rest| rest.strip_suffix('d'))
        {
            return days
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=MAX_TRAILING_DAYS).contains(days))
                .map(Window::Trailing);
        }
        if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
            return value.parse::<i32>().ok().map(Window::Year);
        }
        None
    }

    pub fn label(&self) -> String {
        match self {
            Window::Trailing(days) => format!("Past {days}d"),
            Window::Year(year) => year.to_string(),
        }
    }

    /// Query-string form of the window.
    pub fn slug(&self) -> String {
        match self {
            Window::Trailing(days) => format!("past-{days}d"),
            Window::Year(year) => year.to_string(),
        }
    }

    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            Window::Trailing(days) => {
                let start = today
                    .checked_sub_signed(Duration::days(i64::from(days)))
                    .unwrap_or(NaiveDate::MIN);
                (start, today)
            }
            Window::Year(year) => {
                let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
                (first, last)
            }
        }
    }
}

/// Row of `date` counted from the configured first day of the week, always in `0..7`.
pub fn day_offset(date: NaiveDate, week_start: WeekStart) -> u32 {
    (date.weekday().num_days_from_sunday() + 7 - week_start.index()) % 7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub column: u32,
    pub row: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Week-per-column layout of a window; column 0 holds the first (possibly partial) week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    start: NaiveDate,
    end: NaiveDate,
    week_start: WeekStart,
}

impl GridLayout {
    pub fn new(window: Window, week_start: WeekStart, today: NaiveDate) -> Self {
        let (start, end) = window.bounds(today);
        Self::from_bounds(start, end, week_start)
    }

    pub fn from_bounds(start: NaiveDate, end: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            start,
            end: end.max(start),
            week_start,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn first_offset(&self) -> u32 {
        day_offset(self.start, self.week_start)
    }

    pub fn span_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    pub fn columns(&self) -> u32 {
        (self.span_days() + self.first_offset()).div_ceil(7)
    }

    /// `None` for dates outside the window.
    pub fn position(&self, date: NaiveDate) -> Option<GridPos> {
        if date < self.start || date > self.end {
            return None;
        }
        let index = (date - self.start).num_days() as u32 + self.first_offset();
        Some(GridPos {
            column: index / 7,
            row: index % 7,
        })
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |date| *date <= self.end)
    }

    pub fn cells(&self, series: &BTreeMap<NaiveDate, f64>) -> Vec<GridCell> {
        self.dates()
            .filter_map(|date| {
                let pos = self.position(date)?;
                Some(GridCell {
                    column: pos.column,
                    row: pos.row,
                    date,
                    value: series.get(&date).copied(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn row_matches_weekday_offset_for_every_date() {
        let start = day(2025, 10, 19);
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            let layout = GridLayout::from_bounds(start, day(2026, 10, 19), week_start);
            for date in layout.dates() {
                let pos = layout.position(date).unwrap();
                let expected =
                    (date.weekday().num_days_from_sunday() + 7 - week_start.index()) % 7;
                assert_eq!(pos.row, expected);
                assert!(pos.row < 7);
            }
        }
    }

    #[test]
    fn column_count_matches_distinct_columns() {
        let windows = [
            (day(2026, 1, 1), day(2026, 12, 31)),
            (day(2025, 10, 15), day(2026, 10, 15)),
            (day(2026, 2, 1), day(2026, 2, 28)),
            (day(2026, 3, 4), day(2026, 3, 4)),
        ];
        for (start, end) in windows {
            for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                let layout = GridLayout::from_bounds(start, end, week_start);
                let columns: BTreeSet<u32> = layout
                    .cells(&BTreeMap::new())
                    .iter()
                    .map(|cell| cell.column)
                    .collect();
                let expected = (layout.span_days() + layout.first_offset()).div_ceil(7);
                assert_eq!(columns.len() as u32, expected);
                assert_eq!(layout.columns(), expected);
            }
        }
    }

    #[test]
    fn monday_start_on_wednesday_leaves_five_dates_in_first_column() {
        // 2026-01-07 is a Wednesday.
        let layout =
            GridLayout::from_bounds(day(2026, 1, 7), day(2026, 2, 28), WeekStart::Monday);
        let first: Vec<_> = layout
            .cells(&BTreeMap::new())
            .into_iter()
            .filter(|cell| cell.column == 0)
            .collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].date, day(2026, 1, 7));
        assert_eq!(first[0].row, 2);
        assert_eq!(first[4].date, day(2026, 1, 11));
        assert_eq!(first[4].row, 6);
    }

    #[test]
    fn dates_outside_window_are_excluded() {
        let today = day(2026, 10, 19);
        let layout = GridLayout::new(Window::default(), WeekStart::Sunday, today);
        assert_eq!(layout.start(), day(2025, 10, 19));
        assert!(layout.position(today + Duration::days(1)).is_none());
        assert!(layout.position(layout.start() - Duration::days(1)).is_none());
        assert_eq!(layout.cells(&BTreeMap::new()).len(), 366);
    }

    #[test]
    fn cells_pick_up_series_values() {
        let mut series = BTreeMap::new();
        series.insert(day(2026, 6, 2), 3.0);
        let layout =
            GridLayout::from_bounds(day(2026, 6, 1), day(2026, 6, 7), WeekStart::Sunday);
        let cells = layout.cells(&series);
        assert_eq!(cells[1].value, Some(3.0));
        assert_eq!(cells[0].value, None);
    }

    #[test]
    fn window_parse_and_labels() {
        assert_eq!(Window::parse("past-365d"), Some(Window::Trailing(365)));
        assert_eq!(Window::parse("Past 365d"), Some(Window::Trailing(365)));
        assert_eq!(Window::parse("2024"), Some(Window::Year(2024)));
        assert_eq!(Window::parse("24"), None);
        assert_eq!(Window::parse("past-0d"), None);
        assert_eq!(Window::Year(2024).label(), "2024");
        assert_eq!(Window::default().label(), "Past 365d");
        assert_eq!(Window::default().slug(), "past-365d");
    }

    #[test]
    fn oversized_trailing_window_is_rejected() {
        assert_eq!(Window::parse("past-4000000000d"), None);
        assert_eq!(Window::parse("past-99999999999d"), None);
        assert_eq!(Window::parse("past-3661d"), None);
        assert_eq!(Window::parse("past-3660d"), Some(Window::Trailing(MAX_TRAILING_DAYS)));
    }

    #[test]
    fn trailing_bounds_saturate_instead_of_overflowing() {
        let today = day(2026, 10, 19);
        let (start, end) = Window::Trailing(u32::MAX).bounds(today);
        assert_eq!(end, today);
        assert!(start < today);
    }

    #[test]
    fn year_window_covers_whole_calendar_year() {
        let (start, end) = Window::Year(2024).bounds(day(2026, 10, 19));
        assert_eq!(start, day(2024, 1, 1));
        assert_eq!(end, day(2024, 12, 31));
    }
}
