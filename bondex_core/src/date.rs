//! Date assembly from captured (year, month, day) components.

use crate::error::{Error, Result};

/// Render a captured date as `YYYY-MM-DD`.
///
/// The year is padded to at least four digits, month and day to two. If any
/// component is not an integer the raw captures are joined with hyphens
/// unchanged.
#[must_use]
pub fn normalize(year: &str, month: &str, day: &str) -> String {
    match try_normalize(year, month, day) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!("{e}, keeping raw date text");
            raw_join(year, month, day)
        }
    }
}

/// The fallback rendering: captures joined with hyphens, untouched.
#[must_use]
pub fn raw_join(year: &str, month: &str, day: &str) -> String {
    format!("{year}-{month}-{day}")
}

/// Strict variant of [`normalize`].
///
/// # Errors
/// Returns [`Error::DateComponent`] naming the first component that does not
/// parse as an integer.
pub fn try_normalize(year: &str, month: &str, day: &str) -> Result<String> {
    let y = parse_component("year", year)?;
    let m = parse_component("month", month)?;
    let d = parse_component("day", day)?;
    Ok(format!("{y:04}-{m:02}-{d:02}"))
}

/// Parse an integer, tolerating surrounding whitespace, a leading sign and
/// full-width digits.
fn parse_component(component: &'static str, raw: &str) -> Result<i64> {
    let err = || Error::DateComponent {
        component,
        raw: raw.to_string(),
    };

    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() {
        return Err(err());
    }

    let mut value: i64 = 0;
    for c in digits.chars() {
        let digit = decimal_digit(c).ok_or_else(err)?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or_else(err)?;
    }
    Ok(if negative { -value } else { value })
}

fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '０'..='９' => Some(u32::from(c) - u32::from('０')),
        _ => None,
    }
}
