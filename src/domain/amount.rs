use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A deposit amount, normalized to exactly two decimal places.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific
/// rules: amounts are always strictly positive and carry two-place precision
/// before they are recorded or transmitted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Parses user input into a normalized amount.
    ///
    /// Rejects anything that is not a strictly positive number. Midpoints
    /// round to the nearest even digit (`10.005` -> `10.00`).
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let value: Decimal = input
            .trim()
            .parse()
            .map_err(|_| PaymentError::InvalidAmount(format!("not a number: {input:?}")))?;
        Self::from_decimal(value)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, PaymentError> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount(format!(
                "amount must be positive, got {value}"
            )));
        }
        let mut normalized = value.round_dp(2);
        normalized.rescale(2);
        Ok(Self(normalized))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_normalizes_to_two_places() {
        assert_eq!(Amount::parse("10").unwrap().value(), dec!(10.00));
        assert_eq!(Amount::parse("10.1").unwrap().value(), dec!(10.10));
        assert_eq!(Amount::parse("10.129").unwrap().value(), dec!(10.13));
        assert_eq!(Amount::parse(" 250.00 ").unwrap().value(), dec!(250.00));
    }

    #[test]
    fn test_parse_midpoints_round_to_even() {
        assert_eq!(Amount::parse("10.005").unwrap().value(), dec!(10.00));
        assert_eq!(Amount::parse("10.015").unwrap().value(), dec!(10.02));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("10,00").is_err());
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(Amount::parse("0").is_err());
        assert!(Amount::parse("-3.50").is_err());
    }

    #[test]
    fn test_display_keeps_two_places() {
        assert_eq!(Amount::parse("10").unwrap().to_string(), "10.00");
        assert_eq!(Amount::parse("99.9").unwrap().to_string(), "99.90");
    }

    #[test]
    fn test_try_from_decimal() {
        let amount: Amount = dec!(42.424).try_into().unwrap();
        assert_eq!(amount.value(), dec!(42.42));
        assert!(Amount::try_from(dec!(-1)).is_err());
    }
}
