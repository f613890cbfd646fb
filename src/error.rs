use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors surfaced by the deposit workflows.
///
/// Input errors are recovered locally: the workflow notifies the user and
/// returns the error as a value instead of panicking. Gateway errors are
/// caught at the service boundary and surfaced generically.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("unsupported payment method: {0}")]
    InvalidMethod(String),
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("ledger error: {0}")]
    Ledger(String),
}

/// Failures talking to the payment gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token request rejected: {0}")]
    Auth(String),
    #[error("order rejected: {0}")]
    OrderRejected(String),
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),
}
