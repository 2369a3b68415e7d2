//! Shared value coercion for both conversion directions
//!
//! Every numeric field crossing the survey table goes through the helpers in
//! this module. Coercion is permissive: text that does not start with a
//! number yields NaN instead of an error, so a malformed cell never aborts a
//! run. Presence (whether a field counts as filled in) is decided by one
//! predicate for JSON values and table text alike.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Leading integer: optional sign followed by decimal digits
static INTEGER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer prefix pattern"));

/// Leading decimal literal, with optional fraction and exponent, or an infinity
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid float prefix pattern")
});

// =============================================================================
// Presence
// =============================================================================

/// Whether a field counts as filled in
///
/// Absent values, `null`, `false`, zero, NaN and empty text are not present.
/// Anything else is, including the text `"0"`.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for Value {
    fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number
                .as_f64()
                .map(|n| n != 0.0 && !n.is_nan())
                .unwrap_or(true),
            Value::String(text) => text.is_present(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl Presence for f64 {
    fn is_present(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_present())
    }
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerce a JSON value to an integer, truncating toward zero
///
/// Returns NaN when the value does not start with an integer.
pub fn coerce_int(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().map(f64::trunc).unwrap_or(f64::NAN),
        Value::String(text) => parse_int(text),
        _ => f64::NAN,
    }
}

/// Coerce a JSON value to a floating-point number
///
/// Returns NaN when the value does not start with a decimal literal.
pub fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_float(text),
        _ => f64::NAN,
    }
}

/// Same as [`coerce_int`], for an optional value; absence yields NaN
pub fn coerce_int_opt(value: Option<&Value>) -> f64 {
    value.map(coerce_int).unwrap_or(f64::NAN)
}

/// Same as [`coerce_float`], for an optional value; absence yields NaN
pub fn coerce_float_opt(value: Option<&Value>) -> f64 {
    value.map(coerce_float).unwrap_or(f64::NAN)
}

/// Parse the leading integer of `text`, ignoring anything after it
pub fn parse_int(text: &str) -> f64 {
    INTEGER_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parse the leading decimal literal of `text`, ignoring anything after it
pub fn parse_float(text: &str) -> f64 {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a number the way the survey table stores it
///
/// Integral values have no fractional part (`-90`), NaN renders as `NaN`
/// and infinities as `Infinity` / `-Infinity`, all of which parse back
/// through [`parse_float`].
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // Covers -0.0 too
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Render a scalar JSON value as table text, unchanged
///
/// `null` renders as `None`; strings are taken verbatim. Floating-point
/// numbers render through [`format_number`], so `1.0` becomes `1`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_f64() => number.as_f64().map(format_number),
        other => Some(other.to_string()),
    }
}
