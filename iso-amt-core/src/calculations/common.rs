//! Common utility functions for tax calculations.
//!
//! Rounding, comparison and the lenient text-to-number coercion shared by
//! the AMT and ordinary tax calculations.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use iso_amt_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole currency unit, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use iso_amt_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(25538.5)), dec!(25539));
/// assert_eq!(round_to_whole(dec!(25538.49)), dec!(25538));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use iso_amt_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Trims whitespace, removes thousands separators and a leading `+`.
fn normalize_decimal_input(s: &str) -> String {
    let normalized = s.trim().replace(',', "");
    match normalized.strip_prefix('+') {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Exponents beyond this many steps overflow or vanish for any non-zero value.
const MAX_EXPONENT_STEPS: u64 = 64;

/// Leading number in `-?digits[.digits][(e|E)[+-]digits]` form.
#[derive(Debug, PartialEq, Eq)]
struct NumericPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
    len: usize,
}

fn digit_run(
    bytes: &[u8],
    start: usize,
) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Longest leading number, if its mantissa contains a digit. An `e` without
/// exponent digits is left as trailing text.
fn numeric_prefix(s: &str) -> Option<NumericPrefix<'_>> {
    let bytes = s.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let int_start = usize::from(negative);
    let int_len = digit_run(bytes, int_start);
    let mut end = int_start + int_len;

    let mut fraction = "";
    if bytes.get(end) == Some(&b'.') {
        let frac_len = digit_run(bytes, end + 1);
        fraction = &s[end + 1..end + 1 + frac_len];
        end += 1 + frac_len;
    }
    if int_len == 0 && fraction.is_empty() {
        return None;
    }

    let mut exponent = 0;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_start = end + 1 + sign_len;
        let exp_len = digit_run(bytes, exp_start);
        if exp_len > 0 {
            let magnitude = s[exp_start..exp_start + exp_len]
                .parse::<i64>()
                .unwrap_or(i64::MAX);
            exponent = if bytes[end + 1] == b'-' { -magnitude } else { magnitude };
            end = exp_start + exp_len;
        }
    }

    Some(NumericPrefix {
        negative,
        integer: &s[int_start..int_start + int_len],
        fraction,
        exponent,
        len: end,
    })
}

impl NumericPrefix<'_> {
    /// Value of the prefix, saturating at `Decimal::MAX`/`Decimal::MIN` when
    /// it is too large and flushing to zero when it is too small.
    fn to_decimal(&self) -> Decimal {
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        let mantissa = if self.fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{}", self.fraction)
        };

        let magnitude = match mantissa.parse::<Decimal>() {
            Ok(value) => scale_by_power_of_ten(value, self.exponent),
            Err(_) => Decimal::MAX,
        };
        if self.negative { -magnitude } else { magnitude }
    }
}

/// `value * 10^exponent` for non-negative `value`, saturating at `Decimal::MAX`.
fn scale_by_power_of_ten(
    mut value: Decimal,
    exponent: i64,
) -> Decimal {
    if value.is_zero() {
        return value;
    }
    let steps = exponent.unsigned_abs().min(MAX_EXPONENT_STEPS);
    for _ in 0..steps {
        if exponent > 0 {
            match value.checked_mul(Decimal::TEN) {
                Some(scaled) => value = scaled,
                None => return Decimal::MAX,
            }
        } else {
            value /= Decimal::TEN;
        }
    }
    value
}

/// Coerces free-form text to a number, never failing.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and scientific
/// notation (`"2.5e3"`). Text with trailing junk keeps its leading number
/// (`"12abc"` is 12, `"2.5e3 shares"` is 2500). Numbers beyond the decimal
/// range saturate to `Decimal::MAX`/`Decimal::MIN`. Empty input and text with
/// no leading number are 0.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use iso_amt_core::calculations::common::parse_lenient_decimal;
///
/// assert_eq!(parse_lenient_decimal("150,000"), dec!(150000));
/// assert_eq!(parse_lenient_decimal("25.00 USD"), dec!(25.00));
/// assert_eq!(parse_lenient_decimal("1e40"), Decimal::MAX);
/// assert_eq!(parse_lenient_decimal(""), Decimal::ZERO);
/// assert_eq!(parse_lenient_decimal("n/a"), Decimal::ZERO);
/// ```
pub fn parse_lenient_decimal(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    if let Ok(value) = normalized.parse::<Decimal>() {
        return value;
    }

    let Some(prefix) = numeric_prefix(&normalized) else {
        warn!(input = %s, "unparsable numeric input, using 0");
        return Decimal::ZERO;
    };
    let value = prefix.to_decimal();
    if prefix.len < normalized.len() {
        warn!(input = %s, %value, "ignoring trailing text in numeric input");
    } else if value == Decimal::MAX || value == Decimal::MIN {
        warn!(input = %s, %value, "numeric input out of range, saturating");
    }
    value
}
