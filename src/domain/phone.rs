use crate::error::PaymentError;
use std::fmt;

/// An M-Pesa phone number as entered by the user.
///
/// Keeps the raw form for display and receipts; validation runs over the
/// digit-only form: at least 10 digits, starting with the `254` country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    raw: String,
    digits: String,
}

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 10 || !digits.starts_with("254") {
            return Err(PaymentError::InvalidPhone(format!(
                "expected at least 10 digits starting with 254, got {input:?}"
            )));
        }
        Ok(Self {
            raw: input.to_string(),
            digits,
        })
    }

    /// The number exactly as the user entered it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The digit-only form sent to the gateway.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Convenience check mirroring `PhoneNumber::parse`.
pub fn is_valid_phone_number(input: &str) -> bool {
    PhoneNumber::parse(input).is_ok()
}
