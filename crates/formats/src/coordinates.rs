//! Plain-text trajectory coordinates.
//!
//! One station per line as `x,y,z` (Easting, Northing, MD). Blank lines are
//! ignored and malformed lines are dropped without shifting the remaining
//! stations. [`parse_report`] exposes the dropped lines for callers that want to
//! show them.

use foundation::Point3D;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip one wrapping pair of double quotes from each line and each field.
    pub strip_quotes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strip_quotes: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// The comma split did not produce exactly three fields.
    FieldCount { found: usize },
    /// Field (0-based) is empty or not a number.
    InvalidNumber { field: usize },
    /// Field (0-based) parsed to NaN or an infinity.
    NonFinite { field: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::FieldCount { found } => {
                write!(f, "expected 3 comma-separated values, found {found}")
            }
            RejectReason::InvalidNumber { field } => {
                write!(f, "{} is not a number", axis_name(*field))
            }
            RejectReason::NonFinite { field } => {
                write!(f, "{} is not finite", axis_name(*field))
            }
        }
    }
}

fn axis_name(field: usize) -> &'static str {
    match field {
        0 => "x",
        1 => "y",
        _ => "z",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number in the raw input, blank lines included.
    pub line_number: usize,
    pub raw: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub points: Vec<Point3D>,
    pub rejected: Vec<RejectedLine>,
}

/// Parses with the default options (quote stripping on).
pub fn parse_coordinates(text: &str) -> Vec<Point3D> {
    parse_coordinates_with(text, ParseOptions::default())
}

pub fn parse_coordinates_with(text: &str, options: ParseOptions) -> Vec<Point3D> {
    parse_report(text, options).points
}

/// Parses every line and records why each dropped line was rejected.
///
/// `report.points` is exactly what [`parse_coordinates_with`] returns.
pub fn parse_report(text: &str, options: ParseOptions) -> ParseReport {
    let mut report = ParseReport::default();
    if text.trim().is_empty() {
        return report;
    }

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, options) {
            Ok(point) => report.points.push(point),
            Err(reason) => report.rejected.push(RejectedLine {
                line_number: idx + 1,
                raw: raw_line.to_string(),
                reason,
            }),
        }
    }

    report
}

fn parse_line(line: &str, options: ParseOptions) -> Result<Point3D, RejectReason> {
    // A fully quoted line (`"1,2,3"`) is unwrapped; per-field quotes are left
    // for parse_field.
    let line = match strip_wrapping_quotes(line) {
        inner if options.strip_quotes && !inner.contains('"') => inner,
        _ => line,
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(RejectReason::FieldCount {
            found: fields.len(),
        });
    }

    let mut values = [0.0f64; 3];
    for (field, raw) in fields.iter().enumerate() {
        values[field] = parse_field(raw, field, options)?;
    }

    Ok(Point3D::new(values[0], values[1], values[2]))
}

fn parse_field(raw: &str, field: usize, options: ParseOptions) -> Result<f64, RejectReason> {
    let mut value = raw.trim();
    if options.strip_quotes {
        value = strip_wrapping_quotes(value).trim();
    }
    if value.is_empty() {
        return Err(RejectReason::InvalidNumber { field });
    }

    let parsed: f64 = value
        .parse()
        .map_err(|_| RejectReason::InvalidNumber { field })?;
    if !parsed.is_finite() {
        return Err(RejectReason::NonFinite { field });
    }
    Ok(parsed)
}

fn strip_wrapping_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Writes one `x,y,z` line per point.
///
/// Uses shortest round-trip float formatting, so parsing the output yields
/// the same points.
pub fn to_coordinate_text(points: &[Point3D]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{},{},{}", p.x, p.y, p.z));
    }
    out
}
