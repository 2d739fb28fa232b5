/// Whole numbers print without decimals, everything else with `digits` places.
pub fn format_number(value: f64, digits: usize) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value:.digits$}")
    }
}

pub fn format_with_unit(value: f64, unit: Option<&str>, digits: usize) -> String {
    let formatted = format_number(value, digits);
    match unit.map(str::trim).filter(|unit| !unit.is_empty()) {
        Some(unit) => format!("{formatted} {unit}"),
        None => formatted,
    }
}

/// Unparsable input reads as zero.
pub fn parse_number_input(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}
