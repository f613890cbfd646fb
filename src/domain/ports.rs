use super::amount::Amount;
use super::transaction::{NewTransaction, Transaction};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;

/// Short-lived bearer token returned by the gateway's auth endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

/// Order submission data, as assembled by the deposit workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Workflow-generated transaction reference, unique per attempt.
    pub transaction_id: String,
    pub currency: String,
    pub amount: Amount,
    pub description: String,
    pub phone_number: String,
    pub email_address: String,
}

/// The gateway's answer to an order submission.
#[derive(Debug, Clone, Default)]
pub struct OrderResponse {
    /// Where the user completes the payment. Absent means the order was not
    /// accepted.
    pub redirect_url: Option<String>,
    pub order_tracking_id: Option<String>,
}

/// The gateway's answer to a status query.
#[derive(Debug, Clone, Default)]
pub struct StatusResponse {
    pub status_code: Option<String>,
}

/// Confirmation of an IPN URL registration.
#[derive(Debug, Clone)]
pub struct IpnRegistration {
    pub ipn_id: Option<String>,
}

/// The payment gateway's remote surface.
///
/// `submit_order` and `transaction_status` acquire their own token; callers
/// never hold one across operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn request_token(&self) -> std::result::Result<AccessToken, GatewayError>;
    async fn register_ipn(
        &self,
        token: &AccessToken,
    ) -> std::result::Result<IpnRegistration, GatewayError>;
    async fn submit_order(
        &self,
        order: &OrderRequest,
    ) -> std::result::Result<OrderResponse, GatewayError>;
    async fn transaction_status(
        &self,
        order_tracking_id: &str,
    ) -> std::result::Result<StatusResponse, GatewayError>;
}

/// External transaction history. Accepts append-only records and assigns
/// ids and timestamps itself.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    async fn append(&self, tx: NewTransaction) -> Result<Transaction>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Info,
    Success,
    Destructive,
}

/// A toast-style message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: NotificationVariant::Info,
        }
    }

    pub fn success(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: NotificationVariant::Success,
        }
    }

    pub fn destructive(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: NotificationVariant::Destructive,
        }
    }
}

/// User-facing message sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type TransactionLedgerBox = Box<dyn TransactionLedger>;
pub type NotifierBox = Box<dyn Notifier>;
