//! Numeric extraction from heterogeneous forecast fields
//!
//! Never fails: anything unreadable comes back as a neutral reading so one
//! irregular field cannot abort an evaluation.

use crate::models::FieldValue;

/// First embedded non-negative integer in `value`, or 0
///
/// `"15 mph"` → 15, `"10 to 20 mph"` → 10, `{ "value": 24.7 }` → 24.
/// Negative numbers, missing values and unrecognised shapes read as 0.
pub fn extract_magnitude(value: &FieldValue) -> u32 {
    match value {
        FieldValue::Missing | FieldValue::Other(_) => 0,
        FieldValue::Scalar(n) => (*n).clamp(0, u32::MAX as i64) as u32,
        FieldValue::Real(f) => real_magnitude(*f),
        FieldValue::Quantity { value, .. } => value.map(real_magnitude).unwrap_or(0),
        FieldValue::Text(text) => first_digit_run(text)
            .map(|(digits, _)| parse_saturating(digits))
            .unwrap_or(0),
    }
}

/// Signed reading of `value`, or `None` when nothing numeric is present
///
/// Used for temperatures, where sub-zero readings matter.
pub fn extract_signed(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Missing | FieldValue::Other(_) => None,
        FieldValue::Scalar(n) => Some(*n),
        FieldValue::Real(f) => real_signed(*f),
        FieldValue::Quantity { value, .. } => value.and_then(real_signed),
        FieldValue::Text(text) => first_digit_run(text).map(|(digits, start)| {
            let magnitude = parse_saturating(digits) as i64;
            if text[..start].ends_with('-') {
                -magnitude
            } else {
                magnitude
            }
        }),
    }
}

fn real_magnitude(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        f.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn real_signed(f: f64) -> Option<i64> {
    if f.is_finite() {
        Some(f.round() as i64)
    } else {
        None
    }
}

fn first_digit_run(text: &str) -> Option<(&str, usize)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some((&rest[..len], start))
}

fn parse_saturating(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}
