//! Calendar heatmap: date-to-cell layout, month labels and cell coloring.

pub mod color;
pub mod grid;
pub mod labels;
pub mod tooltip;

use crate::models::{ExtendedHabit, WeekStart, date_key};
use chrono::NaiveDate;
use color::{ColorError, ColorPolicy, Rgba, Theme, effective_bound};
use grid::{GridLayout, Window};
use labels::{MonthLabel, month_labels, weekday_labels};
use serde::Serialize;
use std::fmt::Write;

pub const ROWS: u32 = 7;

const CELL: u32 = 12;
const GUTTER: u32 = 4;
const RADIUS: u32 = 2;
const LEFT_PAD: u32 = 30;
const TOP_PAD: u32 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapCell {
    pub column: u32,
    pub row: u32,
    pub date: String,
    pub value: Option<f64>,
    pub fill: Rgba,
    pub tooltip: String,
}

/// Everything a renderer needs to paint one heatmap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapView {
    pub window: String,
    pub week_start: WeekStart,
    pub columns: u32,
    pub rows: u32,
    pub cells: Vec<HeatmapCell>,
    pub month_labels: Vec<MonthLabel>,
    pub weekday_labels: [&'static str; 7],
    pub legend: [Rgba; 5],
}

pub fn build_view(
    habit: &ExtendedHabit,
    window: Window,
    today: NaiveDate,
    theme: Theme,
) -> Result<HeatmapView, ColorError> {
    let week_start = habit.week_start();
    let layout = GridLayout::new(window, week_start, today);
    let series = habit.habit.series();
    let target = habit.habit.target();
    let bound = effective_bound(target, series.values().copied());
    let policy = ColorPolicy::for_habit(
        habit.habit.kind,
        &habit.habit.color,
        habit.overlay.color_scheme,
        bound,
        theme.empty_color(),
    )?;

    let cells = layout
        .cells(&series)
        .into_iter()
        .map(|cell| HeatmapCell {
            column: cell.column,
            row: cell.row,
            date: date_key(cell.date),
            value: cell.value,
            fill: policy.fill(cell.value),
            tooltip: tooltip::cell_tooltip(
                habit.habit.kind,
                cell.value,
                target,
                habit.unit(),
                cell.date,
            ),
        })
        .collect();

    Ok(HeatmapView {
        window: window.label(),
        week_start,
        columns: layout.columns(),
        rows: ROWS,
        cells,
        month_labels: month_labels(&layout),
        weekday_labels: weekday_labels(week_start),
        legend: policy.legend(),
    })
}

/// Inline SVG rendering of a view. Each call produces an independent document.
pub fn render_svg(view: &HeatmapView) -> String {
    let pitch = CELL + GUTTER;
    let width = LEFT_PAD + view.columns * pitch;
    let height = TOP_PAD + view.rows * pitch;
    let mut svg = String::with_capacity(view.cells.len() * 160);

    let _ = write!(
        svg,
        r#"<svg class="heatmap" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img">"#
    );
    for label in &view.month_labels {
        let _ = write!(
            svg,
            r#"<text class="month" x="{}" y="12">{}</text>"#,
            LEFT_PAD + label.column * pitch,
            escape(&label.label)
        );
    }
    for (row, label) in view.weekday_labels.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        let _ = write!(
            svg,
            r#"<text class="weekday" x="0" y="{}">{}</text>"#,
            TOP_PAD + row as u32 * pitch + CELL - 2,
            label
        );
    }
    for cell in &view.cells {
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{CELL}" height="{CELL}" rx="{RADIUS}" fill="{}" data-date="{}"><title>{}</title></rect>"#,
            LEFT_PAD + cell.column * pitch,
            TOP_PAD + cell.row * pitch,
            cell.fill,
            cell.date,
            escape(&cell.tooltip)
        );
    }
    svg.push_str("</svg>");
    svg
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletionRates, Habit, HabitType, Overlay};
    use std::collections::BTreeMap;

    fn counter_habit() -> ExtendedHabit {
        let mut completed_dates = BTreeMap::new();
        completed_dates.insert("2026-10-17".to_string(), 10.0);
        completed_dates.insert("2026-10-18".to_string(), 5.0);
        completed_dates.insert("2026-10-19".to_string(), 0.0);
        ExtendedHabit {
            habit: Habit {
                id: "h1".into(),
                name: "Read".into(),
                kind: HabitType::Counter,
                color: "#64b5f6".into(),
                target_counter: Some(10.0),
                completed_dates,
                created_at: None,
                user_id: None,
                current_streak: 0,
                longest_streak: 0,
            },
            overlay: Overlay {
                metric: Some("pages".into()),
                week_start: Some(WeekStart::Monday),
                ..Overlay::default()
            },
            completion: CompletionRates::default(),
        }
    }

    #[test]
    fn view_covers_window_and_colors_cells() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let view = build_view(&counter_habit(), Window::default(), today, Theme::Light).unwrap();

        assert_eq!(view.cells.len(), 366);
        assert_eq!(view.rows, 7);
        assert_eq!(view.window, "Past 365d");
        assert_eq!(view.weekday_labels[1], "Tue");

        let top = view.cells.iter().find(|c| c.date == "2026-10-17").unwrap();
        let mid = view.cells.iter().find(|c| c.date == "2026-10-18").unwrap();
        let low = view.cells.iter().find(|c| c.date == "2026-10-19").unwrap();
        assert_eq!(top.fill, view.legend[4]);
        assert_eq!(mid.fill, view.legend[2]);
        assert_eq!(low.fill, view.legend[0]);
        assert_eq!(mid.tooltip, "… 5 pages on October 18, 2026");
    }

    #[test]
    fn svg_has_one_rect_per_cell() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let view = build_view(&counter_habit(), Window::Year(2026), today, Theme::Dark).unwrap();
        let svg = render_svg(&view);
        assert_eq!(svg.matches("<rect").count(), 365);
        assert!(svg.contains(">Jan</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }
}
