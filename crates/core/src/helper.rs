//! Naming and numeric helpers used throughout the workspace.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ArgentumError, ArgentumResult};
use crate::value::Value;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]+(\.[0-9]*)?$").expect("decimal pattern is valid")
});

/// Convert a snake_case key to camelCase.
///
/// Only an underscore followed by a lowercase ASCII letter is collapsed, so
/// strings already in camelCase are left alone and `address_1` is unchanged.
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Upper-case the first character.
pub fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Setter name an input key resolves to: `payment_type` → `setPaymentType`.
pub fn setter_name(key: &str) -> String {
    format!("set{}", ucfirst(&camel_case(key)))
}

/// Convert an externally supplied amount into a float.
///
/// Numbers pass through; strings must be a plain decimal with optional sign.
pub fn to_float(value: &Value) -> ArgentumResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::String(s) => {
            if !DECIMAL.is_match(s) {
                return Err(ArgentumError::invalid_numeric(format!(
                    "string '{s}' is not a valid decimal number"
                )));
            }
            s.parse::<f64>().map_err(|e| {
                ArgentumError::invalid_numeric(format!("string '{s}' is not a valid decimal number: {e}"))
            })
        }
        other => Err(ArgentumError::invalid_numeric(format!(
            "data type {} is not a valid decimal number",
            other.kind()
        ))),
    }
}

const SIGNIFICANT_DIGITS: i32 = 15;

/// Round half away from zero to `places` decimals.
///
/// The scaled value is first snapped to 15 significant digits so
/// representation error (`1.005 * 100 == 100.49999999999999`) does not flip
/// the rounding side, while values genuinely below the half stay below it.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if scaled == 0.0 || !scaled.is_finite() {
        return value;
    }

    let integer_digits = scaled.abs().log10().floor() as i32 + 1;
    let precision = (SIGNIFICANT_DIGITS - integer_digits).min(308);
    let snapped = if precision > 0 {
        let p = 10f64.powi(precision);
        (scaled * p).round() / p
    } else {
        scaled
    };

    snapped.round() / factor
}
