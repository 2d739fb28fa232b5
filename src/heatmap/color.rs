use crate::models::HabitType;
use crate::scheme::ColorScheme;
use colorgrad::{Color, Gradient, GradientBuilder, LinearGradient};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Fraction of the bound at which each threshold sits.
pub const THRESHOLD_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Sample points for the five stops of a continuous gradient.
const STOP_POINTS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// `HabitColor::Green`, used when the service hands back an unparsable color.
const FALLBACK_BASE: Rgba = Rgba([0x81, 0xc7, 0x84, 0xff]);

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("failed to build color gradient: {0}")]
    Gradient(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub fn parse(html: &str) -> Option<Self> {
        Color::from_html(html.trim()).ok().map(|color| Rgba(color.to_rgba8()))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
    }

    fn to_color(self) -> Color {
        let [r, g, b, a] = self.0;
        Color::from_rgba8(r, g, b, a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Fill of a cell without data.
    pub fn empty_color(self) -> Rgba {
        match self {
            Theme::Light => Rgba([0xed, 0xed, 0xed, 0xff]),
            Theme::Dark => Rgba([0x16, 0x1b, 0x22, 0xff]),
        }
    }
}

/// Upper bound used for thresholds: the target, else the largest value, else 1.
pub fn effective_bound(target: Option<f64>, values: impl IntoIterator<Item = f64>) -> f64 {
    if let Some(target) = target.filter(|target| target.is_finite() && *target > 0.0) {
        return target;
    }
    let max = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

pub fn thresholds(bound: f64) -> [f64; 4] {
    THRESHOLD_FRACTIONS.map(|fraction| fraction * bound)
}

/// Index into the five color stops. Values above the bound stay in the top bucket.
pub fn bucket(value: f64, thresholds: &[f64; 4]) -> usize {
    thresholds.iter().filter(|threshold| value >= **threshold).count()
}

/// Empty color followed by the base color at rising opacity.
pub fn palette_stops(empty: Rgba, base: Rgba) -> [Rgba; 5] {
    [
        empty,
        base.with_alpha(0.25),
        base.with_alpha(0.5),
        base.with_alpha(0.75),
        base.with_alpha(1.0),
    ]
}

pub fn scheme_stops(scheme: ColorScheme) -> Result<[Rgba; 5], ColorError> {
    let gradient = scheme_gradient(scheme)?;
    Ok(STOP_POINTS.map(|t| Rgba(gradient.at(t).to_rgba8())))
}

fn scheme_gradient(scheme: ColorScheme) -> Result<LinearGradient, ColorError> {
    GradientBuilder::new()
        .html_colors(scheme.stops())
        .build::<LinearGradient>()
        .map_err(|err| ColorError::Gradient(err.to_string()))
}

fn two_point_gradient(low: Rgba, high: Rgba) -> Result<LinearGradient, ColorError> {
    GradientBuilder::new()
        .colors(&[low.to_color(), high.to_color()])
        .build::<LinearGradient>()
        .map_err(|err| ColorError::Gradient(err.to_string()))
}

/// How a cell value turns into a fill.
pub enum ColorPolicy {
    /// Linear interpolation over `[0, 1]`.
    FlatRange {
        gradient: LinearGradient,
        empty: Rgba,
    },
    /// Percentage-of-bound bucketing into five stops.
    Threshold {
        thresholds: [f64; 4],
        stops: [Rgba; 5],
        empty: Rgba,
    },
}

impl ColorPolicy {
    pub fn flat(empty: Rgba, full: Rgba) -> Result<Self, ColorError> {
        Ok(ColorPolicy::FlatRange {
            gradient: two_point_gradient(empty, full)?,
            empty,
        })
    }

    pub fn flat_scheme(empty: Rgba, scheme: ColorScheme) -> Result<Self, ColorError> {
        Ok(ColorPolicy::FlatRange {
            gradient: scheme_gradient(scheme)?,
            empty,
        })
    }

    pub fn threshold(bound: f64, stops: [Rgba; 5], empty: Rgba) -> Self {
        ColorPolicy::Threshold {
            thresholds: thresholds(bound),
            stops,
            empty,
        }
    }

    /// Picks the policy for a habit: booleans interpolate, counters bucket.
    pub fn for_habit(
        kind: HabitType,
        color: &str,
        scheme: Option<ColorScheme>,
        bound: f64,
        empty: Rgba,
    ) -> Result<Self, ColorError> {
        let base = Rgba::parse(color).unwrap_or(FALLBACK_BASE);
        match (kind, scheme) {
            (HabitType::Boolean, Some(scheme)) => Self::flat_scheme(empty, scheme),
            (HabitType::Boolean, None) => Self::flat(empty, base),
            (HabitType::Counter, Some(scheme)) => {
                Ok(Self::threshold(bound, scheme_stops(scheme)?, empty))
            }
            (HabitType::Counter, None) => {
                Ok(Self::threshold(bound, palette_stops(empty, base), empty))
            }
        }
    }

    pub fn fill(&self, value: Option<f64>) -> Rgba {
        match self {
            ColorPolicy::FlatRange { gradient, empty } => match value {
                Some(value) if value.is_finite() => {
                    Rgba(gradient.at(value.clamp(0.0, 1.0) as f32).to_rgba8())
                }
                _ => *empty,
            },
            ColorPolicy::Threshold {
                thresholds,
                stops,
                empty,
            } => match value {
                Some(value) => stops[bucket(value, thresholds)],
                None => *empty,
            },
        }
    }

    /// Five swatches from lowest to highest, for the legend.
    pub fn legend(&self) -> [Rgba; 5] {
        match self {
            ColorPolicy::FlatRange { gradient, .. } => {
                STOP_POINTS.map(|t| Rgba(gradient.at(t).to_rgba8()))
            }
            ColorPolicy::Threshold { stops, .. } => *stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitColor;

    #[test]
    fn bound_prefers_positive_target() {
        assert_eq!(effective_bound(Some(10.0), [3.0, 40.0]), 10.0);
        assert_eq!(effective_bound(Some(0.0), [3.0, 40.0]), 40.0);
        assert_eq!(effective_bound(None, [2.0, 7.0]), 7.0);
    }

    #[test]
    fn bound_never_collapses_to_zero() {
        assert_eq!(effective_bound(None, std::iter::empty()), 1.0);
        assert_eq!(effective_bound(Some(0.0), [0.0, 0.0]), 1.0);
        assert_eq!(effective_bound(None, [f64::NAN]), 1.0);
    }

    #[test]
    fn bucketing_is_monotonic() {
        let cuts = thresholds(10.0);
        let mut previous = 0;
        for step in 0..=150 {
            let current = bucket(step as f64 / 10.0, &cuts);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn bound_lands_in_top_bucket_and_zero_in_lowest() {
        for bound in [1.0, 3.0, 10.0, 1234.5] {
            let cuts = thresholds(bound);
            assert_eq!(bucket(bound, &cuts), 4);
            assert_eq!(bucket(bound * 3.0, &cuts), 4);
            assert_eq!(bucket(0.0, &cuts), 0);
        }
    }

    #[test]
    fn counter_scenario_buckets_each_day() {
        let empty = Theme::Light.empty_color();
        let policy =
            ColorPolicy::for_habit(HabitType::Counter, HabitColor::Blue.hex(), None, 10.0, empty)
                .unwrap();
        let base = Rgba::parse(HabitColor::Blue.hex()).unwrap();
        let stops = palette_stops(empty, base);

        assert_eq!(policy.fill(Some(10.0)), stops[4]);
        assert_eq!(policy.fill(Some(5.0)), stops[2]);
        assert_eq!(policy.fill(Some(0.0)), stops[0]);
        assert_eq!(policy.fill(None), stops[0]);
    }

    #[test]
    fn palette_matches_fixed_alpha_steps() {
        let base = Rgba::parse("#e57373").unwrap();
        let stops = palette_stops(Theme::Dark.empty_color(), base);
        assert_eq!(stops[0].to_string(), "#161B22FF");
        assert_eq!(stops[1].to_string(), "#E5737340");
        assert_eq!(stops[2].to_string(), "#E5737380");
        assert_eq!(stops[4].to_string(), "#E57373FF");
    }

    #[test]
    fn flat_range_spans_empty_to_habit_color() {
        let empty = Theme::Light.empty_color();
        let policy =
            ColorPolicy::for_habit(HabitType::Boolean, "#81c784", None, 1.0, empty).unwrap();
        assert_eq!(policy.fill(Some(0.0)), empty);
        assert_eq!(policy.fill(Some(1.0)), Rgba::parse("#81c784").unwrap());
        assert_eq!(policy.fill(None), empty);
    }

    #[test]
    fn scheme_overrides_flat_color() {
        let empty = Theme::Light.empty_color();
        let policy = ColorPolicy::for_habit(
            HabitType::Counter,
            "#81c784",
            Some(ColorScheme::Blues),
            4.0,
            empty,
        )
        .unwrap();
        assert_eq!(policy.fill(Some(0.0)), Rgba::parse("#f7fbff").unwrap());
        assert_eq!(policy.fill(Some(4.0)), Rgba::parse("#084594").unwrap());
    }

    #[test]
    fn untracked_day_stays_empty_under_a_scheme() {
        for theme in [Theme::Light, Theme::Dark] {
            let empty = theme.empty_color();
            let policy = ColorPolicy::for_habit(
                HabitType::Counter,
                "#81c784",
                Some(ColorScheme::Blues),
                4.0,
                empty,
            )
            .unwrap();
            assert_eq!(policy.fill(None), empty);
            assert_ne!(policy.fill(Some(0.0)), empty);
            assert_eq!(policy.legend()[0], policy.fill(Some(0.0)));
        }
    }

    #[test]
    fn malformed_habit_color_falls_back() {
        let empty = Theme::Light.empty_color();
        let policy =
            ColorPolicy::for_habit(HabitType::Boolean, "not-a-color", None, 1.0, empty).unwrap();
        assert_eq!(policy.fill(Some(1.0)), Rgba::parse(HabitColor::Green.hex()).unwrap());
    }
}
