//! Time formatting with automatic unit selection.
//!
//! Renders durations in seconds with the unit a human would pick, in
//! plain Unicode or as LaTeX `siunitx` markup for the article tables.
//! NaN and infinite durations render as text instead of overflowing.

/// Narrow no-break space, placed between number and unit.
const NARROW_SPACE: char = '\u{202f}';

/// Assembles a number and a unit, converting the unit to LaTeX unless
/// Unicode output is requested.
fn unit_format(num: f64, unit: &str, unicode: bool) -> String {
    let num = if num.is_infinite() {
        if unicode { "∞".to_string() } else { r"\infty".to_string() }
    } else {
        format!("{}", num.round() as i64)
    };
    if unicode {
        return format!("{num}{NARROW_SPACE}{unit}");
    }
    let unit = match unit {
        "µs" => r"\micro\second",
        "ms" => r"\milli\second",
        "s" => r"\second",
        "min" => r"\minute",
        other => other, // "hours" and "days" have no siunitx macro
    };
    format!(r"\SI{{{num}}}{{{unit}}}")
}

/// Renders a duration in seconds with a readable unit.
pub fn format_time(time: f64, unicode: bool) -> String {
    if time.is_nan() {
        return "nan".to_string();
    }
    let (value, unit) = if time < 1e-3 {
        (time * 1e6, "µs")
    } else if time < 1.0 {
        (time * 1e3, "ms")
    } else if time < 60.0 {
        (time, "s")
    } else if time < 3600.0 {
        (time / 60.0, "min")
    } else if time < 3600.0 * 24.0 {
        (time / 3600.0, "hours")
    } else {
        (time / (3600.0 * 24.0), "days")
    };
    unit_format(value, unit, unicode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_selection() {
        assert_eq!(format_time(2e-5, true), format!("20{NARROW_SPACE}µs"));
        assert_eq!(format_time(0.25, true), format!("250{NARROW_SPACE}ms"));
        assert_eq!(format_time(42.0, true), format!("42{NARROW_SPACE}s"));
        assert_eq!(format_time(1800.0, true), format!("30{NARROW_SPACE}min"));
        assert_eq!(format_time(7200.0, true), format!("2{NARROW_SPACE}hours"));
        assert_eq!(
            format_time(3.0 * 24.0 * 3600.0, true),
            format!("3{NARROW_SPACE}days")
        );
    }

    #[test]
    fn test_latex_markup() {
        assert_eq!(format_time(2e-5, false), r"\SI{20}{\micro\second}");
        assert_eq!(format_time(42.0, false), r"\SI{42}{\second}");
    }

    #[test]
    fn test_degenerate_durations() {
        assert_eq!(format_time(f64::NAN, true), "nan");
        assert_eq!(format_time(f64::INFINITY, true), format!("∞{NARROW_SPACE}days"));
        assert_eq!(format_time(f64::INFINITY, false), r"\SI{\infty}{days}");
    }
}
