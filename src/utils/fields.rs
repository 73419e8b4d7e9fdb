//! Lenient field deserializers for the input CSV files.
//!
//! Numeric cells that do not parse become missing values instead of failing
//! the whole load.

use serde::{Deserialize, Deserializer};

pub fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `1880`, `1880.0`, or any date-like text whose first 4-digit group
/// is the year (`01/01/1880 12:00:00 AM`, `1880-01-01T00:00:00`).
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    if let Some(value) = parse_f64(trimmed) {
        return (value.fract() == 0.0 && value.abs() < i32::MAX as f64).then_some(value as i32);
    }

    trimmed
        .split(|c: char| !c.is_ascii_digit())
        .find(|group| group.len() == 4)
        .and_then(|group| group.parse::<i32>().ok())
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_f64))
}

pub fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_year))
}

/// Blank cells become `None`, other cells are trimmed.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
