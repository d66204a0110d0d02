//! JSON point lists: `[{"x": .., "y": .., "z": ..}, ...]`.
//!
//! Field values are coerced leniently: numbers pass through, numeric strings
//! are parsed, `null`/`false`/blank strings count as 0 and `true` as 1.
//! Arrays are joined into text first (`[]` and `[null]` are 0, `[[5]]` is 5,
//! `[1, 2]` is NaN), the way a JavaScript `Number()` call treats them.
//! Anything else (missing field, object, non-numeric text) is NaN and fails
//! the finiteness check.

use foundation::Point3D;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum PointsJsonError {
    /// `points` was missing, not an array, or shorter than the minimum.
    TooFewPoints { found: Option<usize>, min: usize },
    /// Point at `index` has an x/y/z that does not coerce to a finite number.
    NonFinite { index: usize },
}

impl std::fmt::Display for PointsJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointsJsonError::TooFewPoints { found: None, min } => {
                write!(f, "expected an array of at least {min} points")
            }
            PointsJsonError::TooFewPoints {
                found: Some(found),
                min,
            } => write!(f, "expected at least {min} points, found {found}"),
            PointsJsonError::NonFinite { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for PointsJsonError {}

/// Reads the `points` array of a request body.
///
/// The array length is checked before any point is coerced.
pub fn points_from_json(points: Option<&Value>, min: usize) -> Result<Vec<Point3D>, PointsJsonError> {
    let arr = match points {
        Some(Value::Array(arr)) => arr,
        _ => return Err(PointsJsonError::TooFewPoints { found: None, min }),
    };
    if arr.len() < min {
        return Err(PointsJsonError::TooFewPoints {
            found: Some(arr.len()),
            min,
        });
    }

    arr.iter()
        .enumerate()
        .map(|(index, point)| {
            let field = |name: &str| point.get(name).map_or(f64::NAN, coerce_number);
            Point3D::finite(field("x"), field("y"), field("z"))
                .ok_or(PointsJsonError::NonFinite { index })
        })
        .collect()
}

/// Lenient number coercion for a single JSON value.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_str(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) => coerce_str(&joined_text(value)),
        Value::Object(_) => f64::NAN,
    }
}

/// Text form of an array element: nested arrays join with `,` and `null`
/// becomes empty.
fn joined_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(joined_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn coerce_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |v| v as f64);
    }
    s.parse().unwrap_or(f64::NAN)
}
