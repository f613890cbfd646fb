use crate::domain::ports::{Notification, Notifier, TransactionLedger};
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// A thread-safe in-memory transaction ledger.
///
/// Assigns sequential ids and wall-clock timestamps on append, standing in
/// for the external transaction ledger. Used by the CLI and as a test double.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.transactions.read().await.clone()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryLedger {
    async fn append(&self, tx: NewTransaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        let recorded = Transaction::from_new(tx, transactions.len() as u64 + 1, Utc::now());
        transactions.push(recorded.clone());
        Ok(recorded)
    }
}

/// A notifier that records every message, for assertions in tests.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notifier lock poisoned")
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;
    use crate::domain::transaction::{TransactionStatus, TransactionType};

    fn deposit(details: &str) -> NewTransaction {
        NewTransaction {
            amount: Amount::parse("10").unwrap(),
            r#type: TransactionType::Deposit,
            status: TransactionStatus::Pending,
            details: details.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ledger_assigns_sequential_ids() {
        let ledger = InMemoryLedger::new();
        let first = ledger.append(deposit("first")).await.unwrap();
        let second = ledger.append(deposit("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = ledger.transactions().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].details, "first");
    }

    #[tokio::test]
    async fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("First", "one".to_string()));
        notifier.notify(Notification::success("Second", "two".to_string()));

        let seen = notifier.notifications();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].title, "First");
        assert_eq!(seen[1].title, "Second");
    }
}
