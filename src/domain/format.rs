//! Presentation helpers fixed to the pt-BR locale and the Brazilian Real.
//!
//! Output of these functions is for display only and is never parsed back.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::{Cents, MoneyError, cents_from_f64};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("not a finite number: {0}")]
    NotANumber(f64),

    #[error("amount out of range: {0}")]
    OutOfRange(f64),

    #[error("not a date: {0:?}")]
    NotADate(String),
}

/// Format a decimal amount as Reais, e.g. `1234.5678` -> `"R$ 1.234,57"`.
pub fn format_currency(value: f64) -> Result<String, InvalidInputError> {
    let cents = cents_from_f64(value).map_err(|err| match err {
        MoneyError::OutOfRange => InvalidInputError::OutOfRange(value),
        MoneyError::NotFinite | MoneyError::InvalidFormat => InvalidInputError::NotANumber(value),
    })?;
    Ok(format_brl(cents))
}

/// Format cents as Reais, e.g. `-50000` -> `"-R$ 500,00"`.
pub fn format_brl(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(abs_cents / 100),
        abs_cents % 100
    )
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Parse a calendar date from either a date-only value (`2024-01-15`) or an
/// instant with time-of-day (`2024-01-15T10:30:00Z`). The date of an instant
/// is read in its own offset.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, InvalidInputError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }
    Err(InvalidInputError::NotADate(value.to_string()))
}

/// Format a date-like string as `DD/MM/YYYY`, dropping any time-of-day.
pub fn format_date(value: &str) -> Result<String, InvalidInputError> {
    parse_calendar_date(value).map(format_naive_date)
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
