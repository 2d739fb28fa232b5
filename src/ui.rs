use crate::format::{format_number, format_with_unit};
use crate::forms::{HabitForm, Toast};
use crate::heatmap::grid::Window;
use crate::heatmap::tooltip::describe_ratio;
use crate::heatmap::{HeatmapView, escape, render_svg};
use crate::models::{ExtendedHabit, HabitColor, HabitType, WeekStart, date_key};
use crate::scheme::{ColorScheme, SchemeGroup};
use crate::stats::recent_days;
use chrono::NaiveDate;
use std::fmt::Write;

const RECENT_DAYS: usize = 5;

pub fn render_index(
    habits: &[ExtendedHabit],
    today: NaiveDate,
    toast: Option<Toast>,
    authenticated: bool,
) -> String {
    let mut body = String::new();
    body.push_str(
        r#"<header class="row">
      <div>
        <h1>Habits</h1>
        <p class="subtitle">Track the last few days here, open a habit for its full heatmap.</p>
      </div>
      <a class="button primary" href="/habits/new">New habit</a>
    </header>"#,
    );

    if !authenticated {
        body.push_str(r#"<p class="hint">No session configured. Set HABIT_API_TOKEN to load your habits.</p>"#);
    } else if habits.is_empty() {
        body.push_str(r#"<p class="hint">No habits yet. Create one to get started.</p>"#);
    }

    body.push_str(r#"<section class="cards">"#);
    for habit in habits {
        body.push_str(&habit_card(habit, today));
    }
    body.push_str("</section>");

    page("Habits", toast, &body)
}

fn habit_card(extended: &ExtendedHabit, today: NaiveDate) -> String {
    let habit = &extended.habit;
    let id = escape(&habit.id);
    let color = escape(&habit.color);
    let tint = if habit.is_done_on(today) {
        format!(r#" style="background: {color}20""#)
    } else {
        String::new()
    };

    let mut card = String::new();
    let _ = write!(
        card,
        r#"<article class="card"{tint}>
        <div class="card-head">
          <span class="swatch" style="background: {color}"></span>
          <a class="name" href="/habits/{id}">{name}</a>
          <span class="streak">{current} day streak · best {longest}</span>
        </div>
        <div class="days">"#,
        name = escape(&habit.name),
        current = habit.current_streak,
        longest = habit.longest_streak,
    );

    for day in recent_days(today, RECENT_DAYS) {
        let date = date_key(day);
        let label = day.format("%a %-d");
        let _ = write!(card, r#"<div class="day"><span class="label">{label}</span>"#);
        match habit.kind {
            HabitType::Boolean => {
                let (action, mark, class) = if habit.is_done_on(day) {
                    ("untrack", "✓", "done")
                } else {
                    ("track", "·", "")
                };
                let _ = write!(
                    card,
                    r#"<form method="post" action="/habits/{id}/{action}"><input type="hidden" name="date" value="{date}" /><button class="toggle {class}" type="submit" style="--habit: {color}">{mark}</button></form>"#
                );
            }
            HabitType::Counter => {
                let ratio = describe_ratio(Some(habit.value_on(day).unwrap_or(0.0)), habit.target());
                let _ = write!(
                    card,
                    r#"<span class="ratio">{ratio}</span><div class="steppers"><form method="post" action="/habits/{id}/untrack"><input type="hidden" name="date" value="{date}" /><button class="step" type="submit">−</button></form><form method="post" action="/habits/{id}/track"><input type="hidden" name="date" value="{date}" /><button class="step" type="submit">+</button></form></div>"#
                );
            }
        }
        card.push_str("</div>");
    }
    card.push_str("</div></article>");
    card
}

pub fn render_new_form(form: &HabitForm, preview: &HeatmapView, toast: Option<Toast>) -> String {
    let kind = form.habit_type();
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<header class="row">
      <div>
        <h1>New habit</h1>
        <p class="subtitle">The preview uses generated sample data.</p>
      </div>
      <a class="button" href="/">Back</a>
    </header>
    <form class="panel" method="post" action="/habits">
      <label>Name <input name="name" value="{name}" placeholder="Morning run" /></label>
      <label>Type
        <select name="type">
          <option value="boolean"{boolean_sel}>Yes / no</option>
          <option value="counter"{counter_sel}>Counter</option>
        </select>
      </label>
      <label>Target (counter only) <input name="target" inputmode="decimal" value="{target}" /></label>
      <label>Metric (counter only) <input name="metric" value="{metric}" placeholder="pages" /></label>
      {colors}
      {week_start}
      {schemes}
      <div class="actions">
        <button class="button" type="submit" formaction="/habits/new" formmethod="get">Update preview</button>
        <button class="button primary" type="submit">Create habit</button>
      </div>
    </form>
    <section class="panel">
      <h2>Preview</h2>
      {heatmap}
    </section>"#,
        name = escape(&form.name),
        boolean_sel = selected(kind == HabitType::Boolean),
        counter_sel = selected(kind == HabitType::Counter),
        target = escape(&form.target),
        metric = escape(&form.metric),
        colors = color_picker(&form.color),
        week_start = week_start_picker(WeekStart::parse(&form.week_start).unwrap_or_default()),
        schemes = scheme_picker(ColorScheme::parse(&form.color_scheme)),
        heatmap = heatmap_block(preview),
    );

    page("New habit", toast, &body)
}

pub fn render_habit_page(
    extended: &ExtendedHabit,
    view: &HeatmapView,
    window: Window,
    toast: Option<Toast>,
) -> String {
    let habit = &extended.habit;
    let id = escape(&habit.id);

    let mut filters = String::new();
    let windows = std::iter::once(Window::default()).chain(habit.years().into_iter().map(Window::Year));
    for option in windows {
        let class = if option == window { "tab active" } else { "tab" };
        let _ = write!(
            filters,
            r#"<a class="{class}" href="/habits/{id}?window={slug}">{label}</a>"#,
            slug = option.slug(),
            label = option.label(),
        );
    }

    let target = match (habit.kind, habit.target()) {
        (HabitType::Counter, Some(target)) => format!(
            r#"<div class="stat"><span class="label">Target</span><span class="value">{}</span></div>"#,
            escape(&format_with_unit(target, extended.unit(), 2))
        ),
        _ => String::new(),
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<header class="row">
      <div>
        <h1><span class="swatch" style="background: {color}"></span> {name}</h1>
        <p class="subtitle">{kind} habit · weeks start on {week_start}</p>
      </div>
      <div class="actions">
        <a class="button" href="/">Back</a>
        <a class="button" href="/habits/{id}/edit">Edit</a>
      </div>
    </header>
    <section class="panel stats">
      <div class="stat"><span class="label">Current streak</span><span class="value">{current}</span></div>
      <div class="stat"><span class="label">Longest streak</span><span class="value">{longest}</span></div>
      <div class="stat"><span class="label">Last 7 days</span><span class="value">{week}</span></div>
      <div class="stat"><span class="label">This month</span><span class="value">{month}</span></div>
      <div class="stat"><span class="label">This year</span><span class="value">{year}</span></div>
      {target}
    </section>
    <section class="panel">
      <div class="tabs">{filters}</div>
      {heatmap}
    </section>"#,
        color = escape(&habit.color),
        name = escape(&habit.name),
        kind = match habit.kind {
            HabitType::Boolean => "Yes / no",
            HabitType::Counter => "Counter",
        },
        week_start = extended.week_start().as_str(),
        current = habit.current_streak,
        longest = habit.longest_streak,
        week = percent(extended.completion.completion_rate_7_days),
        month = percent(extended.completion.completion_rate_month),
        year = percent(extended.completion.completion_rate_year),
        heatmap = heatmap_block(view),
    );

    page(&habit.name, toast, &body)
}

pub fn render_edit_form(extended: &ExtendedHabit, toast: Option<Toast>) -> String {
    let habit = &extended.habit;
    let id = escape(&habit.id);
    let metric = match habit.kind {
        HabitType::Counter => format!(
            r#"<label>Metric <input name="metric" value="{}" placeholder="pages" /></label>"#,
            escape(extended.overlay.metric.as_deref().unwrap_or_default())
        ),
        HabitType::Boolean => String::new(),
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<header class="row">
      <div>
        <h1>Edit {name}</h1>
        <p class="subtitle">Color scheme, metric and week start are stored on this server only.</p>
      </div>
      <a class="button" href="/habits/{id}">Back</a>
    </header>
    <form class="panel" method="post" action="/habits/{id}/edit">
      <label>Name <input name="name" value="{name}" /></label>
      {metric}
      {colors}
      {week_start}
      {schemes}
      <div class="actions">
        <button class="button primary" type="submit">Save</button>
      </div>
    </form>
    <form class="panel danger" method="post" action="/habits/{id}/delete">
      <button class="button danger" type="submit">Delete habit</button>
    </form>"#,
        name = escape(&habit.name),
        colors = color_picker(&habit.color),
        week_start = week_start_picker(extended.week_start()),
        schemes = scheme_picker(extended.overlay.color_scheme),
    );

    page("Edit habit", toast, &body)
}

fn heatmap_block(view: &HeatmapView) -> String {
    let mut legend = String::new();
    for color in &view.legend {
        let _ = write!(legend, r#"<span class="legend-cell" style="background: {color}"></span>"#);
    }
    format!(
        r#"<div class="heatmap-card">{svg}</div><div class="legend"><span>Less</span>{legend}<span>More</span></div>"#,
        svg = render_svg(view),
    )
}

/// Palette radios, led by a checked swatch when the current color is outside the palette.
fn color_picker(current: &str) -> String {
    let mut html = String::from(r#"<fieldset class="colors"><legend>Color</legend>"#);
    let current = current.trim();
    if !current.is_empty() && HabitColor::from_hex(current).is_none() {
        let _ = write!(
            html,
            r#"<label class="color" title="Current"><input type="radio" name="color" value="{hex}" checked /><span class="swatch" style="background: {hex}"></span></label>"#,
            hex = escape(current),
        );
    }
    for color in HabitColor::ALL {
        let checked = if color.hex().eq_ignore_ascii_case(current) {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<label class="color" title="{label}"><input type="radio" name="color" value="{hex}"{checked} /><span class="swatch" style="background: {hex}"></span></label>"#,
            label = color.label(),
            hex = color.hex(),
        );
    }
    html.push_str("</fieldset>");
    html
}

fn week_start_picker(current: WeekStart) -> String {
    let mut html = String::from(r#"<label>Week starts on <select name="week_start">"#);
    for option in [WeekStart::Sunday, WeekStart::Monday] {
        let _ = write!(
            html,
            r#"<option value="{value}"{sel}>{value}</option>"#,
            value = option.as_str(),
            sel = selected(option == current),
        );
    }
    html.push_str("</select></label>");
    html
}

fn scheme_picker(current: Option<ColorScheme>) -> String {
    let mut html = String::from(r#"<label>Color scheme <select name="color_scheme">"#);
    let _ = write!(
        html,
        r#"<option value=""{}>Habit color</option>"#,
        selected(current.is_none())
    );
    for group in [
        SchemeGroup::SingleHue,
        SchemeGroup::MultiHue,
        SchemeGroup::Diverging,
        SchemeGroup::Cyclical,
    ] {
        let _ = write!(html, r#"<optgroup label="{}">"#, group.label());
        for scheme in ColorScheme::ALL.into_iter().filter(|s| s.group() == group) {
            let _ = write!(
                html,
                r#"<option value="{name}" style="background: {gradient}"{sel}>{name}</option>"#,
                name = scheme.name(),
                gradient = scheme.css_gradient(),
                sel = selected(current == Some(scheme)),
            );
        }
        html.push_str("</optgroup>");
    }
    html.push_str("</select></label>");
    html
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

fn percent(rate: f64) -> String {
    format!("{}%", format_number((rate * 100.0).round(), 0))
}

fn toast_banner(toast: Option<Toast>) -> String {
    match toast {
        Some(toast) => format!(
            r#"<div class="toast" data-type="{kind}">{message}</div>"#,
            kind = if toast.is_error() { "error" } else { "ok" },
            message = toast.message(),
        ),
        None => String::new(),
    }
}

fn page(title: &str, toast: Option<Toast>, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{TOAST}}", &toast_banner(toast))
        .replace("{{BODY}}", body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f6f1;
      --bg-2: #d7e8d3;
      --ink: #2b2a28;
      --accent: #2f7a4b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef4ea 60%, #f7f8f4 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle, .hint {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
    }

    .panel.stats {
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .cards {
      display: grid;
      gap: 14px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .card-head {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .card-head .name {
      font-weight: 600;
      color: var(--ink);
      text-decoration: none;
    }

    .card-head .streak {
      margin-left: auto;
      color: #8b857d;
      font-size: 0.9rem;
    }

    .swatch {
      display: inline-block;
      width: 14px;
      height: 14px;
      border-radius: 50%;
    }

    .days {
      display: grid;
      grid-template-columns: repeat(5, 1fr);
      gap: 10px;
    }

    .day {
      display: grid;
      justify-items: center;
      gap: 6px;
    }

    .day .label {
      font-size: 0.8rem;
      color: #8b857d;
    }

    .steppers {
      display: flex;
      gap: 6px;
    }

    button, .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      text-decoration: none;
      font-family: inherit;
    }

    .button.primary {
      background: var(--accent);
      color: white;
    }

    .button.danger {
      background: #c63b2b;
      color: white;
    }

    .toggle {
      width: 40px;
      height: 40px;
      padding: 0;
    }

    .toggle.done {
      background: var(--habit);
      color: white;
    }

    .step {
      padding: 4px 12px;
    }

    label {
      display: grid;
      gap: 6px;
      font-weight: 500;
    }

    input, select {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .colors {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      border: none;
      padding: 0;
    }

    .colors .color {
      display: flex;
      align-items: center;
      gap: 4px;
    }

    .actions {
      display: flex;
      gap: 10px;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      border-radius: 999px;
      padding: 6px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
    }

    .heatmap-card {
      overflow-x: auto;
    }

    .heatmap text {
      font-size: 10px;
      fill: #7a746d;
    }

    .legend {
      display: flex;
      align-items: center;
      gap: 4px;
      font-size: 0.8rem;
      color: #7a746d;
    }

    .legend-cell {
      width: 12px;
      height: 12px;
      border-radius: 2px;
    }

    .toast {
      padding: 12px 16px;
      border-radius: 14px;
      font-weight: 500;
    }

    .toast[data-type="error"] {
      background: #fbe3df;
      color: #c63b2b;
    }

    .toast[data-type="ok"] {
      background: #e1f2e6;
      color: #2d7a4b;
    }

    @media (max-width: 600px) {
      .app {
        padding: 26px 18px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    {{TOAST}}
    {{BODY}}
  </main>
</body>
</html>
"#;
