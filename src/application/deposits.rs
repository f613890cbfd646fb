use crate::domain::amount::Amount;
use crate::domain::method::PaymentMethod;
use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{
    IpnRegistration, Notification, NotifierBox, OrderRequest, PaymentGatewayBox,
    TransactionLedgerBox,
};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionStatus, TransactionType};
use crate::error::{GatewayError, PaymentError, Result};
use chrono::Utc;
use rand::Rng;

const CURRENCY: &str = "USD";
const REFERENCE_PREFIX: &str = "TX";

/// Where the user finishes a mobile-money payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpesaCheckout {
    pub redirect_url: String,
    pub order_tracking_id: Option<String>,
}

/// The deposit workflows.
///
/// Owns its collaborators behind ports so callers can substitute the ledger,
/// the notifier, or the gateway. Every side effect is awaited in sequence;
/// there is no retry and no rollback. A deposit that fails remotely after the
/// ledger append leaves its PENDING record behind.
pub struct DepositService {
    ledger: TransactionLedgerBox,
    notifier: NotifierBox,
    gateway: PaymentGatewayBox,
}

impl DepositService {
    pub fn new(
        ledger: TransactionLedgerBox,
        notifier: NotifierBox,
        gateway: PaymentGatewayBox,
    ) -> Self {
        Self {
            ledger,
            notifier,
            gateway,
        }
    }

    /// Runs the mobile-money deposit flow: validate, record a PENDING
    /// transaction, then hand the order to the gateway and return the
    /// redirect the user completes the payment at.
    pub async fn process_mpesa_deposit(
        &self,
        amount: &str,
        phone_number: &str,
        email: &str,
    ) -> Result<MpesaCheckout> {
        let amount = match Amount::parse(amount) {
            Ok(amount) => amount,
            Err(err) => {
                self.notifier.notify(Notification::destructive(
                    "Invalid Amount",
                    "Please enter a valid deposit amount.".to_string(),
                ));
                return Err(err);
            }
        };

        let phone = match PhoneNumber::parse(phone_number) {
            Ok(phone) => phone,
            Err(err) => {
                self.notifier.notify(Notification::destructive(
                    "Invalid Phone Number",
                    "Please enter a valid M-Pesa phone number starting with 254.".to_string(),
                ));
                return Err(err);
            }
        };

        let reference = new_reference();

        // Recorded before the remote call: a failed submission leaves this
        // record PENDING.
        self.ledger
            .append(NewTransaction {
                amount,
                r#type: TransactionType::Deposit,
                status: TransactionStatus::Pending,
                details: format!("Via M-Pesa ({}) - Ref: {}", phone.raw(), reference),
            })
            .await?;

        self.notifier.notify(Notification::info(
            "Initializing Payment",
            "Connecting to Pesapal payment gateway...".to_string(),
        ));

        let order = OrderRequest {
            transaction_id: reference,
            currency: CURRENCY.to_string(),
            amount,
            description: format!("Deposit to Vertex Trading Account - ${amount}"),
            phone_number: phone.digits().to_string(),
            email_address: email.to_string(),
        };

        match self.submit_checkout(&order).await {
            Ok(checkout) => {
                self.notifier.notify(Notification::success(
                    "Payment Gateway Ready",
                    "You'll be redirected to complete your payment with M-Pesa.".to_string(),
                ));
                Ok(checkout)
            }
            Err(err) => {
                tracing::error!(error = %err, "payment initialization failed");
                self.notifier.notify(Notification::destructive(
                    "Payment Error",
                    "There was an error connecting to the payment gateway. Please try again."
                        .to_string(),
                ));
                Err(err.into())
            }
        }
    }

    async fn submit_checkout(&self, order: &OrderRequest) -> std::result::Result<MpesaCheckout, GatewayError> {
        let response = self.gateway.submit_order(order).await?;
        let redirect_url = response.redirect_url.ok_or_else(|| {
            GatewayError::OrderRejected("no redirect URL in response".to_string())
        })?;
        Ok(MpesaCheckout {
            redirect_url,
            order_tracking_id: response.order_tracking_id,
        })
    }

    /// Card and crypto deposits complete synchronously: no remote call, the
    /// transaction is recorded COMPLETED immediately.
    pub async fn process_instant_deposit(
        &self,
        amount: &str,
        method: PaymentMethod,
    ) -> Result<Transaction> {
        if method == PaymentMethod::Mpesa {
            return Err(PaymentError::InvalidMethod(
                "mpesa deposits go through the mobile-money flow".to_string(),
            ));
        }

        let amount = match Amount::parse(amount) {
            Ok(amount) => amount,
            Err(err) => {
                self.notifier.notify(Notification::destructive(
                    "Invalid Amount",
                    "Please enter a valid deposit amount.".to_string(),
                ));
                return Err(err);
            }
        };

        let recorded = match self
            .ledger
            .append(NewTransaction {
                amount,
                r#type: TransactionType::Deposit,
                status: TransactionStatus::Completed,
                details: format!("Via {}", method.label()),
            })
            .await
        {
            Ok(recorded) => recorded,
            Err(err) => {
                tracing::error!(error = %err, "deposit recording failed");
                self.notifier.notify(Notification::destructive(
                    "Payment Error",
                    "There was an error processing your payment. Please try again.".to_string(),
                ));
                return Err(err);
            }
        };

        self.notifier.notify(Notification::success(
            "Deposit Successful",
            format!("Your deposit of ${amount} has been processed successfully."),
        ));
        Ok(recorded)
    }

    /// Polls the gateway for the status of a submitted order.
    ///
    /// Returns the gateway's status code verbatim, "PENDING" when the
    /// response carries none, and "ERROR" when the query itself fails. Not
    /// called by the deposit flow; available for an external poller.
    pub async fn check_payment_status(&self, order_tracking_id: &str) -> String {
        match self.gateway.transaction_status(order_tracking_id).await {
            Ok(response) => response
                .status_code
                .unwrap_or_else(|| "PENDING".to_string()),
            Err(err) => {
                tracing::error!(error = %err, "status check failed");
                "ERROR".to_string()
            }
        }
    }

    /// One-time IPN URL registration, done during application setup rather
    /// than per deposit.
    pub async fn register_ipn(&self) -> Result<IpnRegistration> {
        let token = self
            .gateway
            .request_token()
            .await
            .map_err(PaymentError::Gateway)?;
        Ok(self.gateway.register_ipn(&token).await?)
    }
}

/// Transaction reference, unique per attempt: fixed prefix, wall-clock
/// millis, and a random integer below 10000.
fn new_reference() -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce = rand::thread_rng().gen_range(0..10_000);
    format!("{REFERENCE_PREFIX}-{millis}-{nonce}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let reference = new_reference();
        let parts: Vec<&str> = reference.splitn(3, '-').collect();
        assert_eq!(parts[0], "TX");
        assert!(parts[1].parse::<i64>().is_ok());
        let nonce: u32 = parts[2].parse().unwrap();
        assert!(nonce < 10_000);
    }

    #[test]
    fn test_references_differ_between_attempts() {
        // Same millisecond is likely here; the nonce keeps attempts distinct.
        let refs: std::collections::HashSet<String> =
            (0..50).map(|_| new_reference()).collect();
        assert!(refs.len() > 1);
    }
}
