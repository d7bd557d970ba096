use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point drift.
/// For BRL, 1 real = 100 centavos, so R$ 50,00 = 5000 cents.
pub type Cents = i64;

/// Largest magnitude a single stored amount can have. The backend keeps
/// amounts as `NUMERIC(10, 2)`, i.e. up to 99.999.999,99.
pub const MAX_AMOUNT_CENTS: Cents = 9_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("invalid money format")]
    InvalidFormat,

    #[error("amount is not a finite number")]
    NotFinite,

    #[error("amount is out of range")]
    OutOfRange,
}

/// Format cents as a plain decimal string, as used in CSV and wire payloads.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Convert a decimal amount to cents, rounding half away from zero.
/// Example: 1234.5678 -> 123457, -0.005 -> -1
pub fn cents_from_f64(value: f64) -> Result<Cents, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    let scaled = (value * 100.0).round();
    if scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return Err(MoneyError::OutOfRange);
    }
    Ok(scaled as Cents)
}

/// Convert a single record's amount to cents, rejecting magnitudes the
/// backend cannot store. Any number of such amounts sums without overflow.
pub fn amount_from_f64(value: f64) -> Result<Cents, MoneyError> {
    let cents = cents_from_f64(value)?;
    if cents.unsigned_abs() > MAX_AMOUNT_CENTS.unsigned_abs() {
        return Err(MoneyError::OutOfRange);
    }
    Ok(cents)
}

/// Convert cents back to a decimal amount for wire payloads.
pub fn cents_to_f64(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Parse a decimal string into cents.
/// Accepts either `.` or `,` as decimal separator. When `,` is the decimal
/// separator, `.` may group thousands. Digits past the second decimal round
/// half away from zero.
/// Example: "50.00" -> 5000, "12,5" -> 1250, "1.234,56" -> 123456, "0.005" -> 1
pub fn parse_cents(input: &str) -> Result<Cents, MoneyError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if input.is_empty() {
        return Err(MoneyError::InvalidFormat);
    }

    let (units_str, decimal_str) = match input.rsplit_once(',') {
        Some((units, decimals)) => (units, decimals),
        None => input.split_once('.').unwrap_or((input, "")),
    };
    let units_str = if units_str.contains('.') {
        ungroup_thousands(units_str)?
    } else {
        units_str.to_string()
    };
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
        || (units_str.is_empty() && decimal_str.is_empty())
    {
        return Err(MoneyError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| MoneyError::OutOfRange)?
    };

    let digits: Vec<i64> = decimal_str
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .collect();
    let tenths = digits.first().copied().unwrap_or(0);
    let hundredths = digits.get(1).copied().unwrap_or(0);
    let round_up = digits.get(2).is_some_and(|d| *d >= 5);

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
        .ok_or(MoneyError::OutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

/// "1.234.567" -> "1234567". Groups after the first must be three digits.
fn ungroup_thousands(units: &str) -> Result<String, MoneyError> {
    let mut groups = units.split('.');
    let first = groups.next().unwrap_or_default();
    if first.is_empty() || first.len() > 3 {
        return Err(MoneyError::InvalidFormat);
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return Err(MoneyError::InvalidFormat);
        }
        digits.push_str(group);
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_cents_from_f64_rounds_half_away_from_zero() {
        assert_eq!(cents_from_f64(1234.56), Ok(123456));
        assert_eq!(cents_from_f64(1234.5678), Ok(123457));
        assert_eq!(cents_from_f64(-567.89), Ok(-56789));
        assert_eq!(cents_from_f64(0.125), Ok(13));
        assert_eq!(cents_from_f64(-0.125), Ok(-13));
        assert_eq!(cents_from_f64(0.0), Ok(0));
    }

    #[test]
    fn test_cents_from_f64_rejects_non_finite() {
        assert_eq!(cents_from_f64(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(cents_from_f64(f64::INFINITY), Err(MoneyError::NotFinite));
        assert_eq!(cents_from_f64(1e300), Err(MoneyError::OutOfRange));
    }

    #[test]
    fn test_amount_from_f64_is_bounded() {
        assert_eq!(amount_from_f64(99_999_999.99), Ok(MAX_AMOUNT_CENTS));
        assert_eq!(amount_from_f64(-99_999_999.99), Ok(-MAX_AMOUNT_CENTS));
        assert_eq!(amount_from_f64(100_000_000.0), Err(MoneyError::OutOfRange));
        assert_eq!(amount_from_f64(5e16), Err(MoneyError::OutOfRange));
        assert_eq!(amount_from_f64(f64::NAN), Err(MoneyError::NotFinite));
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("12,5"), Ok(1250));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.994"), Ok(10099));
        assert_eq!(parse_cents("100.995"), Ok(10100));
        assert_eq!(parse_cents("-0.005"), Ok(-1));
    }

    #[test]
    fn test_parse_cents_grouped_thousands() {
        assert_eq!(parse_cents("1.234,56"), Ok(123456));
        assert_eq!(parse_cents("1.234.567,8"), Ok(123456780));
        assert_eq!(parse_cents("-12.000,00"), Ok(-1200000));
        assert_eq!(parse_cents("1.234,"), Ok(123400));
        assert_eq!(parse_cents(",5"), Ok(50));
    }

    #[test]
    fn test_parse_cents_rejects_bad_grouping() {
        assert!(parse_cents("1.23,45").is_err());
        assert!(parse_cents("1234.567,00").is_err());
        assert!(parse_cents(".234,00").is_err());
        assert!(parse_cents("1,234.56").is_err());
        assert!(parse_cents("1,2,3").is_err());
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents("-").is_err());
        assert!(parse_cents(".").is_err());
        assert!(parse_cents("1e5").is_err());
        assert!(parse_cents("--5").is_err());
        assert!(parse_cents("+-5").is_err());
    }
}
