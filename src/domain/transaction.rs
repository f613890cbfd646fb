use super::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Error,
}

/// A transaction as constructed by the deposit workflows, before the ledger
/// has assigned an id and timestamp.
///
/// Created once per deposit attempt and never updated afterwards by this
/// crate, even when the gateway outcome later diverges from the recorded
/// status.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewTransaction {
    pub amount: Amount,
    pub r#type: TransactionType,
    pub status: TransactionStatus,
    /// Free-text description including the method and reference.
    pub details: String,
}

/// A recorded transaction, with the ledger-assigned id and timestamp.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub amount: Amount,
    pub r#type: TransactionType,
    pub status: TransactionStatus,
    pub details: String,
}

impl Transaction {
    pub fn from_new(new: NewTransaction, id: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            amount: new.amount,
            r#type: new.r#type,
            status: new.status,
            details: new.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Deposit).unwrap(),
            "\"DEPOSIT\""
        );
    }
}
