//! Currency amounts in integer minor units (cents).
//!
//! Form input is parsed with exact decimal arithmetic so that `12.345`
//! rounds half-up to `1235` without binary floating point drift. Scientific
//! notation is accepted the same way browsers coerce number fields.

use std::fmt;

/// Reasons a submitted amount is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Not a plain decimal number, or too large for storage.
    Invalid,
    /// Rounds to zero cents or less.
    NotPositive,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => f.write_str("Please enter a valid amount."),
            Self::NotPositive => f.write_str("Please enter an amount greater than $0."),
        }
    }
}

impl std::error::Error for AmountError {}

/// Positive amount in cents that fits the `INT4` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(i32);

impl Cents {
    /// Parse a major-unit decimal string (`"12.3"`, `"1.5e2"`) into cents.
    ///
    /// Blank input counts as zero. An optional `e`/`E` exponent scales the
    /// decimal exactly. Digits past the third decimal place are ignored once
    /// the half-up decision on the third digit is made.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::Cents;
    ///
    /// assert_eq!(Cents::parse("12.3").unwrap().get(), 1230);
    /// assert_eq!(Cents::parse("12.345").unwrap().get(), 1235);
    /// assert_eq!(Cents::parse("1e3").unwrap().get(), 100_000);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::NotPositive);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (
                mantissa,
                exponent.parse::<i32>().map_err(|_| AmountError::Invalid)?,
            ),
            None => (unsigned, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountError::Invalid);
        }

        let digits: Vec<i64> = whole
            .bytes()
            .chain(fraction.bytes())
            .map(|b| i64::from(b - b'0'))
            .skip_while(|digit| *digit == 0)
            .collect();
        if digits.is_empty() {
            return Err(AmountError::NotPositive);
        }

        // Position of the cents point relative to the last digit.
        let fraction_len = i64::try_from(fraction.len()).map_err(|_| AmountError::Invalid)?;
        let shift = i64::from(exponent) + 2 - fraction_len;
        let dropped = usize::try_from(shift.min(0).unsigned_abs()).unwrap_or(usize::MAX);
        let kept = digits.len().saturating_sub(dropped);

        let push = |cents: i64, digit: i64| {
            cents
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit))
                .filter(|value| *value <= i64::from(i32::MAX))
                .ok_or(AmountError::Invalid)
        };
        let mut cents = digits[..kept]
            .iter()
            .try_fold(0_i64, |cents, digit| push(cents, *digit))?;
        for _ in 0..shift.max(0) {
            cents = push(cents, 0)?;
        }

        let round_up =
            dropped > 0 && dropped <= digits.len() && digits.get(kept).is_some_and(|d| *d >= 5);
        cents += i64::from(round_up);

        if negative || cents == 0 {
            return Err(AmountError::NotPositive);
        }
        i32::try_from(cents)
            .map(Self)
            .map_err(|_| AmountError::Invalid)
    }

    /// Wrap a stored value; non-positive values are rejected.
    pub fn from_stored(value: i32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Convert cents to major units for form pre-population.
pub fn to_major_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format cents as US dollars with thousands separators: `$1,234.56`.
///
/// # Examples
/// ```
/// use dashboard::domain::format_currency;
///
/// assert_eq!(format_currency(123_456), "$1,234.56");
/// assert_eq!(format_currency(-50), "-$0.50");
/// ```
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let whole = (magnitude / 100).to_string();
    let fraction = magnitude % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12.3", 1230)]
    #[case("12.345", 1235)]
    #[case("12.344", 1234)]
    #[case("12.3449", 1234)]
    #[case("0.005", 1)]
    #[case("50", 5000)]
    #[case(" 7.5 ", 750)]
    #[case("+1", 100)]
    #[case(".5", 50)]
    #[case("5.", 500)]
    #[case("21474836.47", 2_147_483_647)]
    #[case("1e3", 100_000)]
    #[case("1.5E2", 15_000)]
    #[case("125e-2", 125)]
    #[case("1.2345e1", 1235)]
    #[case("5e-3", 1)]
    #[case("0.00001e5", 100)]
    #[case("+2e+1", 2000)]
    fn parses_to_cents(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(Cents::parse(raw).map(Cents::get), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("0.00")]
    #[case("0.004")]
    #[case("-5")]
    #[case("-0")]
    #[case("")]
    #[case("   ")]
    #[case("4e-3")]
    #[case("0e5")]
    #[case("1e-999")]
    #[case("-1e3")]
    fn rejects_non_positive(#[case] raw: &str) {
        assert_eq!(Cents::parse(raw), Err(AmountError::NotPositive));
    }

    #[rstest]
    #[case("abc")]
    #[case("1e")]
    #[case("e3")]
    #[case("1e1.5")]
    #[case("1e+-1")]
    #[case("1e8")]
    #[case("1e99999999999")]
    #[case("1,000")]
    #[case("1.2.3")]
    #[case(".")]
    #[case("-")]
    #[case("$5")]
    #[case("21474836.48")]
    #[case("99999999999999999999999")]
    fn rejects_invalid(#[case] raw: &str) {
        assert_eq!(Cents::parse(raw), Err(AmountError::Invalid));
    }

    #[rstest]
    #[case(0, "$0.00")]
    #[case(5, "$0.05")]
    #[case(99_999, "$999.99")]
    #[case(100_000, "$1,000.00")]
    #[case(123_456_789, "$1,234,567.89")]
    #[case(-1_000_000, "-$10,000.00")]
    fn formats_currency(#[case] cents: i64, #[case] expected: &str) {
        assert_eq!(format_currency(cents), expected);
    }

    #[rstest]
    fn converts_back_to_major_units() {
        assert!((to_major_units(1235) - 12.35).abs() < f64::EPSILON);
    }
}
