//! Lenient cell coercion.
//!
//! Every coercion returns `None` for values that cannot be interpreted;
//! callers decide whether that drops the row or leaves a blank.

use crate::sheet::Cell;

/// Numeric value of a cell. Text is trimmed and parsed as a float; empty,
/// boolean, NaN and unparseable cells are `None`.
pub fn to_number(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(v) => *v,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::Empty | Cell::Bool(_) => return None,
    };
    (!value.is_nan()).then_some(value)
}

/// Integer value of a cell. Accepts integral numbers and integer text
/// (`"2001"`, `"2001.0"`).
pub fn to_integer(cell: &Cell) -> Option<i64> {
    if let Cell::Text(s) = cell {
        if let Ok(v) = s.trim().parse::<i64>() {
            return Some(v);
        }
    }
    let value = to_number(cell)?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

/// Text value of a cell. Numbers render in minimal form so a FIPS code
/// stored as the number 1001 reads as `"1001"`. Empty and whitespace-only
/// cells are `None`.
pub fn to_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) if s.trim().is_empty() => None,
        Cell::Text(s) => Some(s.clone()),
        Cell::Number(v) => Some(format_number(*v)),
        Cell::Bool(b) => Some(b.to_string()),
    }
}

/// Shortest decimal rendering that round-trips: `2.0` is `"2"`, `1.5` is
/// `"1.5"`, integral values never carry a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Normalizes -0.0.
        return "0".to_string();
    }
    format!("{value}")
}
