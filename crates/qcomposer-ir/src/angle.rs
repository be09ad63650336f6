//! Rotation angle text: parsing user input and pretty-printing radians.

use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::Regex;

static PI_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?)(\d*\.?\d*)\s*\*?\s*pi(?:\s*/\s*(\d+\.?\d*))?$")
        .expect("angle pattern is a valid regex")
});

/// Parse an angle typed by the user, in radians.
///
/// Accepts plain numbers (`0.25`, `-1e-3`) and multiples of π
/// (`pi`, `-pi/4`, `3pi/4`, `2*pi`, `0.5 π`). Returns `None` for anything
/// else, including non-finite results.
pub fn parse_angle(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = text.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    let normalized = text.to_lowercase().replace('π', "pi");
    let caps = PI_EXPR.captures(&normalized)?;

    let coeff = match &caps[2] {
        "" => 1.0,
        digits => digits.parse::<f64>().ok()?,
    };
    let mut value = coeff * PI;

    if let Some(denom) = caps.get(3) {
        let denom = denom.as_str().parse::<f64>().ok()?;
        if denom == 0.0 {
            return None;
        }
        value /= denom;
    }
    if &caps[1] == "-" {
        value = -value;
    }

    value.is_finite().then_some(value)
}

/// Format radians for display, preferring common fractions of π.
pub fn format_angle(value: f64) -> String {
    const FORMS: [(f64, &str); 8] = [
        (2.0 * PI, "2*pi"),
        (PI, "pi"),
        (3.0 * PI / 4.0, "3pi/4"),
        (PI / 2.0, "pi/2"),
        (PI / 3.0, "pi/3"),
        (PI / 4.0, "pi/4"),
        (PI / 6.0, "pi/6"),
        (PI / 8.0, "pi/8"),
    ];

    if value == 0.0 {
        return "0".to_string();
    }
    for (form, text) in FORMS {
        if (value - form).abs() < 1e-9 {
            return text.to_string();
        }
        if (value + form).abs() < 1e-9 {
            return format!("-{text}");
        }
    }
    format!("{value:.4}")
}
