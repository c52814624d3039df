//! Decimal numeric type backed by rust_decimal.
//!
//! Every amount, spread and ratio in the simulator is carried in this type.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Decimal numeric type for financial calculations.
///
/// Serializes to (and deserializes from) a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Build `mantissa * 10^-scale` without going through a string.
    pub fn from_parts(mantissa: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(mantissa, scale))
    }

    /// Parse a Decimal from a canonical string (`-1234.5`).
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent, no trailing zeros).
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// Returns the value 100.
    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    /// `self / rhs`, or zero when `rhs` is zero.
    ///
    /// Zero denominators are a policy case in the cascade (empty portfolio,
    /// zero BAI, zero RWA), never an error.
    pub fn div_or_zero(self, rhs: Decimal) -> Decimal {
        if rhs.is_zero() {
            return Decimal::zero();
        }
        self.0.checked_div(rhs.0).map(Decimal).unwrap_or_default()
    }

    /// `self / rhs * 100`, or zero when `rhs` is zero.
    pub fn percent_of(self, rhs: Decimal) -> Decimal {
        self.div_or_zero(rhs) * Decimal::hundred()
    }

    /// Round to `dp` decimal places, halves away from zero.
    pub fn round_dp(&self, dp: u32) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns true when `|self - other| < tolerance`.
    pub fn within(&self, other: Decimal, tolerance: Decimal) -> bool {
        (*self - other).abs() < tolerance
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

// Arithmetic saturates at the representable bounds instead of panicking.
impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_mul(rhs.0))
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

/// Permissive numeric normalization for user-typed values.
///
/// Contract: never fails. Whitespace, currency symbols and `%` are dropped;
/// when both `.` and `,` appear the input is read as pt-BR (`1.234,56`),
/// otherwise a lone `,` is the decimal separator. The longest numeric prefix
/// is parsed and anything unparseable yields zero.
pub fn normalize(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let unified = if cleaned.contains('.') && cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        cleaned.replacen(',', ".", 1)
    };

    let prefix = numeric_prefix(&unified);
    Decimal::from_str_canonical(prefix).unwrap_or_default()
}

fn numeric_prefix(s: &str) -> &str {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return "";
    }
    s[..end].trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_decimal_canonical_no_exponent() {
        let decimal = d("123.4500");
        let formatted = decimal.to_canonical_string();
        assert!(!formatted.contains('e'));
        assert_eq!(formatted, "123.45");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let a = d("10.5");
        let b = d("2.5");

        assert_eq!((a + b).to_canonical_string(), "13");
        assert_eq!((a - b).to_canonical_string(), "8");
        assert_eq!((a * b).to_canonical_string(), "26.25");
        assert_eq!((-a).to_canonical_string(), "-10.5");
    }

    #[test]
    fn test_arithmetic_saturates_on_overflow() {
        let huge = normalize("50000000000000000000000000000");
        assert_eq!(huge * d("2000"), Decimal::new(RustDecimal::MAX));
        assert_eq!(-huge * d("2000"), Decimal::new(RustDecimal::MIN));
        assert_eq!(huge + huge, Decimal::new(RustDecimal::MAX));
        assert_eq!(-huge - huge, Decimal::new(RustDecimal::MIN));

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc, Decimal::new(RustDecimal::MAX));
    }

    #[test]
    fn test_decimal_json_serialization() {
        let json = serde_json::to_value(d("123.456")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_decimal_json_deserializes_integers_and_floats() {
        let a: Decimal = serde_json::from_str("1500").unwrap();
        let b: Decimal = serde_json::from_str("2.75").unwrap();
        assert_eq!(a, d("1500"));
        assert_eq!(b, d("2.75"));
    }

    #[test]
    fn test_div_or_zero_guards_zero_denominator() {
        assert_eq!(d("10").div_or_zero(Decimal::zero()), Decimal::zero());
        assert_eq!(d("10").div_or_zero(d("4")), d("2.5"));
        assert_eq!(d("1").percent_of(d("8")), d("12.5"));
    }

    #[test]
    fn test_round_dp_half_away_from_zero() {
        assert_eq!(d("2.5").round_dp(0), d("3"));
        assert_eq!(d("-2.5").round_dp(0), d("-3"));
        assert_eq!(d("30.3066").round_dp(1), d("30.3"));
        assert_eq!(d("6.9693").round_dp(2), d("6.97"));
    }

    #[test]
    fn test_within_tolerance() {
        assert!(d("100.004").within(d("100"), d("0.01")));
        assert!(!d("100.01").within(d("100"), d("0.01")));
    }

    #[test]
    fn test_sum() {
        let total: Decimal = vec![d("1.5"), d("2"), d("-0.5")].into_iter().sum();
        assert_eq!(total, d("3"));
    }

    #[test]
    fn test_normalize_plain_and_pt_br() {
        assert_eq!(normalize("2000"), d("2000"));
        assert_eq!(normalize(" 1.234,56 "), d("1234.56"));
        assert_eq!(normalize("5,25"), d("5.25"));
        assert_eq!(normalize("-12.5"), d("-12.5"));
        assert_eq!(normalize("R$ 300"), d("300"));
        assert_eq!(normalize("4.5%"), d("4.5"));
    }

    #[test]
    fn test_normalize_never_fails() {
        assert_eq!(normalize(""), Decimal::zero());
        assert_eq!(normalize("abc"), Decimal::zero());
        assert_eq!(normalize("-"), Decimal::zero());
        assert_eq!(normalize("12-3"), d("12"));
        assert_eq!(normalize("7."), d("7"));
    }
}
