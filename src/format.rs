//! Human-readable abbreviations for large numbers (display only).

const UNITS: [&str; 7] = ["", "K", "M", "B", "T", "P", "E"];

/// Abbreviate `value` with a thousands suffix and at most one decimal,
/// e.g. `1500.0 -> "1.5K"`, `2_000_000.0 -> "2M"`, `999.0 -> "999"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let mut scaled = value.abs();
    let mut unit = 0;
    while scaled >= 1000.0 && unit < UNITS.len() - 1 {
        scaled /= 1000.0;
        unit += 1;
    }
    let mut rounded = (scaled * 10.0).round() / 10.0;
    // 999.96K rounds to 1000K; promote to the next unit.
    if rounded >= 1000.0 && unit < UNITS.len() - 1 {
        rounded /= 1000.0;
        unit += 1;
    }
    let text = format!("{rounded:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{sign}{text}{}", UNITS[unit])
}
