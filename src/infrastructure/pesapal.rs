use crate::config::GatewayConfig;
use crate::domain::ports::{
    AccessToken, IpnRegistration, OrderRequest, OrderResponse, PaymentGateway, StatusResponse,
};
use crate::error::GatewayError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// HTTP client for the Pesapal REST API.
///
/// Every operation is a single request with no retry; `submit_order` and
/// `transaction_status` acquire a fresh token first. Timeouts are whatever
/// the underlying client defaults to.
pub struct PesapalGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl PesapalGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn basic_credential(&self) -> String {
        BASE64.encode(format!(
            "{}:{}",
            self.config.consumer_key, self.config.consumer_secret
        ))
    }
}

#[async_trait]
impl PaymentGateway for PesapalGateway {
    async fn request_token(&self) -> Result<AccessToken, GatewayError> {
        let response = self
            .client
            .post(self.endpoint("/api/Auth/RequestToken"))
            .header("Authorization", format!("Basic {}", self.basic_credential()))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "token request failed");
            return Err(GatewayError::Auth(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body)
            )));
        }

        let body: TokenResponse = response.json().await?;
        body.access_token
            .map(AccessToken)
            .ok_or_else(|| GatewayError::Auth("no access_token in response".to_string()))
    }

    async fn register_ipn(
        &self,
        token: &AccessToken,
    ) -> Result<IpnRegistration, GatewayError> {
        let request = RegisterIpnRequest {
            url: self.config.ipn_url.clone(),
            ipn_notification_type: "GET".to_string(),
        };
        let response = self
            .client
            .post(self.endpoint("/api/URLSetup/RegisterIPN"))
            .bearer_auth(&token.0)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "IPN registration failed");
            return Err(GatewayError::OrderRejected(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body)
            )));
        }

        let body: RegisterIpnResponse = response.json().await?;
        Ok(IpnRegistration { ipn_id: body.ipn_id })
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, GatewayError> {
        let token = self.request_token().await?;

        let amount = order
            .amount
            .value()
            .to_f64()
            .ok_or_else(|| GatewayError::OrderRejected("amount not representable".to_string()))?;
        let request = SubmitOrderRequest {
            id: order.transaction_id.clone(),
            currency: order.currency.clone(),
            amount,
            description: order.description.clone(),
            callback_url: self.config.callback_url.clone(),
            notification_id: format!("notify-{}", Utc::now().timestamp_millis()),
            billing_address: BillingAddress {
                phone_number: order.phone_number.clone(),
                email_address: order.email_address.clone(),
            },
        };

        let response = self
            .client
            .post(self.endpoint("/api/Transactions/SubmitOrderRequest"))
            .bearer_auth(&token.0)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "order submission failed");
            return Err(GatewayError::OrderRejected(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body)
            )));
        }

        let body: SubmitOrderResponse = response.json().await?;
        Ok(OrderResponse {
            redirect_url: body.redirect_url,
            order_tracking_id: body.order_tracking_id,
        })
    }

    async fn transaction_status(
        &self,
        order_tracking_id: &str,
    ) -> Result<StatusResponse, GatewayError> {
        let token = self.request_token().await?;

        let response = self
            .client
            .get(self.endpoint("/api/Transactions/GetTransactionStatus"))
            .query(&[("orderTrackingId", order_tracking_id)])
            .bearer_auth(&token.0)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "status query failed");
            return Err(GatewayError::MalformedResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body)
            )));
        }

        let body: TransactionStatusResponse = response.json().await?;
        Ok(StatusResponse {
            status_code: body.status_code.as_ref().and_then(status_code_string),
        })
    }
}

// The gateway reports status codes as either bare numbers or strings.
fn status_code_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterIpnRequest {
    url: String,
    ipn_notification_type: String,
}

#[derive(Debug, Deserialize)]
struct RegisterIpnResponse {
    ipn_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitOrderRequest {
    id: String,
    currency: String,
    amount: f64,
    description: String,
    callback_url: String,
    notification_id: String,
    billing_address: BillingAddress,
}

#[derive(Debug, Serialize)]
struct BillingAddress {
    phone_number: String,
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct SubmitOrderResponse {
    redirect_url: Option<String>,
    order_tracking_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionStatusResponse {
    status_code: Option<serde_json::Value>,
}
