use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of deposit methods a user can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Crypto,
    Mpesa,
}

impl PaymentMethod {
    /// All methods, in presentation order.
    pub const ALL: [PaymentMethod; 3] = [Self::Card, Self::Crypto, Self::Mpesa];

    /// Human-readable label used in receipts and the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit Card",
            Self::Crypto => "Crypto Wallet",
            Self::Mpesa => "M-Pesa",
        }
    }

    /// The literal method token reported by the selector.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Crypto => "crypto",
            Self::Mpesa => "mpesa",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "crypto" => Ok(Self::Crypto),
            "mpesa" => Ok(Self::Mpesa),
            other => Err(PaymentError::InvalidMethod(other.to_string())),
        }
    }
}
