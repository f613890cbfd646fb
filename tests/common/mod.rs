use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vertex_deposits::application::deposits::DepositService;
use vertex_deposits::domain::ports::{
    AccessToken, IpnRegistration, OrderRequest, OrderResponse, PaymentGateway, StatusResponse,
    TransactionLedger,
};
use vertex_deposits::domain::transaction::{NewTransaction, Transaction};
use vertex_deposits::error::{GatewayError, Result};
use vertex_deposits::infrastructure::in_memory::{InMemoryLedger, RecordingNotifier};

/// Records the order of collaborator calls across the doubles.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: &str) {
        self.0.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// An `InMemoryLedger` that also notes every append in the call log.
#[derive(Clone)]
pub struct LoggingLedger {
    pub inner: InMemoryLedger,
    pub log: CallLog,
}

#[async_trait]
impl TransactionLedger for LoggingLedger {
    async fn append(&self, tx: NewTransaction) -> Result<Transaction> {
        self.log.record("ledger.append");
        self.inner.append(tx).await
    }
}

/// What the stubbed gateway should do when the workflow reaches it.
#[derive(Clone)]
pub enum GatewayScript {
    Success {
        redirect_url: &'static str,
        order_tracking_id: &'static str,
    },
    NoRedirect,
    FailToken,
    FailSubmit,
    Status(Option<&'static str>),
    FailStatus,
}

pub struct StubGateway {
    pub script: GatewayScript,
    pub log: CallLog,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn request_token(&self) -> std::result::Result<AccessToken, GatewayError> {
        self.log.record("gateway.request_token");
        match self.script {
            GatewayScript::FailToken => Err(GatewayError::Auth("stub: auth down".to_string())),
            _ => Ok(AccessToken("token-1".to_string())),
        }
    }

    async fn register_ipn(
        &self,
        _token: &AccessToken,
    ) -> std::result::Result<IpnRegistration, GatewayError> {
        self.log.record("gateway.register_ipn");
        Ok(IpnRegistration {
            ipn_id: Some("ipn-1".to_string()),
        })
    }

    async fn submit_order(
        &self,
        _order: &OrderRequest,
    ) -> std::result::Result<OrderResponse, GatewayError> {
        self.log.record("gateway.submit_order");
        match self.script {
            GatewayScript::Success {
                redirect_url,
                order_tracking_id,
            } => Ok(OrderResponse {
                redirect_url: Some(redirect_url.to_string()),
                order_tracking_id: Some(order_tracking_id.to_string()),
            }),
            GatewayScript::NoRedirect => Ok(OrderResponse::default()),
            // The production adapter acquires its token inside submit_order,
            // so an auth failure surfaces from here.
            GatewayScript::FailToken => Err(GatewayError::Auth("stub: auth down".to_string())),
            GatewayScript::FailSubmit => {
                Err(GatewayError::OrderRejected("stub: rejected".to_string()))
            }
            _ => Ok(OrderResponse::default()),
        }
    }

    async fn transaction_status(
        &self,
        _order_tracking_id: &str,
    ) -> std::result::Result<StatusResponse, GatewayError> {
        self.log.record("gateway.transaction_status");
        match self.script {
            GatewayScript::Status(code) => Ok(StatusResponse {
                status_code: code.map(str::to_string),
            }),
            GatewayScript::FailStatus => {
                Err(GatewayError::MalformedResponse("stub: status down".to_string()))
            }
            _ => Ok(StatusResponse::default()),
        }
    }
}

/// Builds a service wired to doubles, returning the observation handles.
pub fn service_with(
    script: GatewayScript,
) -> (DepositService, InMemoryLedger, RecordingNotifier, CallLog) {
    let log = CallLog::default();
    let ledger = InMemoryLedger::new();
    let notifier = RecordingNotifier::new();
    let service = DepositService::new(
        Box::new(LoggingLedger {
            inner: ledger.clone(),
            log: log.clone(),
        }),
        Box::new(notifier.clone()),
        Box::new(StubGateway {
            script,
            log: log.clone(),
        }),
    );
    (service, ledger, notifier, log)
}
