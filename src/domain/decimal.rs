//! Lossless decimal type for human-unit token amounts and prices.
//!
//! On-chain quantities stay `i128`; this wrapper only appears at the edges
//! where amounts are scaled by token decimals or priced in USD.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lossless decimal numeric type backed by rust_decimal.
///
/// Serializes to a JSON string so large token amounts survive round trips.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::str")] RustDecimal);

impl Decimal {
    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Interpret an integer amount carrying `scale` implied decimals.
    ///
    /// Returns None if the amount does not fit in 96 bits of mantissa.
    pub fn from_scaled(amount: i128, scale: u32) -> Option<Self> {
        RustDecimal::try_from_i128_with_scale(amount, scale)
            .ok()
            .map(|d| Decimal(d.normalize()))
    }

    /// Multiply by `10^scale` and truncate toward zero to an integer amount.
    pub fn to_scaled(&self, scale: u32) -> Option<i128> {
        let factor = RustDecimal::from_i128_with_scale(pow10(scale)?, 0);
        self.0.checked_mul(factor)?.trunc().to_i128()
    }

    /// Format without exponent notation or trailing zeros.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Round half to even, to an integer.
    pub fn round(&self) -> Self {
        Decimal(self.0.round())
    }

    pub fn checked_div(&self, rhs: Decimal) -> Option<Self> {
        self.0.checked_div(rhs.0).map(Decimal)
    }
}

/// `10^exp` as i128, None past the 28 digits rust_decimal can hold.
pub(crate) fn pow10(exp: u32) -> Option<i128> {
    if exp > 28 {
        return None;
    }
    10i128.checked_pow(exp)
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

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_from_scaled() {
        assert_eq!(Decimal::from_scaled(150_000_000, 8), Some(d("1.5")));
        assert_eq!(Decimal::from_scaled(-1, 18), Some(d("-0.000000000000000001")));
        assert_eq!(Decimal::from_scaled(0, 6), Some(Decimal::zero()));
    }

    #[test]
    fn test_from_scaled_rejects_oversized_mantissa() {
        assert_eq!(Decimal::from_scaled(i128::MAX, 0), None);
    }

    #[test]
    fn test_to_scaled_truncates() {
        assert_eq!(d("1.5").to_scaled(8), Some(150_000_000));
        assert_eq!(d("0.0000001239").to_scaled(8), Some(12));
        assert_eq!(d("-0.0000001239").to_scaled(8), Some(-12));
        assert_eq!(d("1").to_scaled(29), None);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(d("2.5").round(), d("2"));
        assert_eq!(d("3.5").round(), d("4"));
        assert_eq!(d("28.571").round(), d("29"));
    }

    #[test]
    fn test_json_serializes_as_string() {
        let json = serde_json::to_value(d("123.456")).unwrap();
        assert_eq!(json, serde_json::json!("123.456"));

        let parsed: Decimal = serde_json::from_str("\"35000\"").unwrap();
        assert_eq!(parsed, d("35000"));
    }

    #[test]
    fn test_canonical_string_drops_trailing_zeros() {
        assert_eq!(d("10.500").to_canonical_string(), "10.5");
        assert_eq!(d("1000").to_canonical_string(), "1000");
    }
}
