//! Hosted payment gateway adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No credentials configured; hosted payments are disabled
    #[error("Payment gateway is not configured")]
    Unavailable,

    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Gateway transport error: {0}")]
    Transport(String),
}

impl From<GatewayError> for shared::error::AppError {
    fn from(err: GatewayError) -> Self {
        use shared::error::{AppError, ErrorCode};
        match err {
            GatewayError::Unavailable => AppError::new(ErrorCode::GatewayUnavailable),
            GatewayError::Rejected(msg) => {
                AppError::with_message(ErrorCode::GatewayRejected, msg)
            }
            GatewayError::Transport(msg) => AppError::with_message(ErrorCode::NetworkError, msg),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Outbound invoice request
#[derive(Debug, Clone)]
pub struct CreateInvoiceRequest {
    /// Our correlation key: invoice number for orders, `TOPUP-…` for top-ups
    pub external_id: String,
    pub amount: i64,
    pub description: String,
    pub customer: CustomerInfo,
    /// Gateway-side channel restriction, e.g. `QRIS` or `BCA`
    pub method_hint: Option<&'static str>,
}

/// A hosted invoice created at the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayInvoice {
    pub id: String,
    pub invoice_url: String,
}

/// Seam for the hosted payment provider
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<GatewayInvoice, GatewayError>;
}

/// Stand-in used when no secret key is configured; every call fails with
/// [`GatewayError::Unavailable`]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_invoice(
        &self,
        _request: CreateInvoiceRequest,
    ) -> Result<GatewayInvoice, GatewayError> {
        Err(GatewayError::Unavailable)
    }
}

#[derive(Serialize)]
struct InvoiceBody<'a> {
    external_id: &'a str,
    amount: i64,
    description: &'a str,
    payer_email: &'a str,
    customer: &'a CustomerInfo,
    success_redirect_url: String,
    failure_redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_methods: Option<[&'static str; 1]>,
}

/// Xendit-style hosted invoice API client
pub struct HostedGateway {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
    public_base_url: String,
}

impl HostedGateway {
    pub fn new(api_url: String, secret_key: String, public_base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            secret_key,
            public_base_url,
        }
    }
}

#[async_trait]
impl PaymentGateway for HostedGateway {
    async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<GatewayInvoice, GatewayError> {
        let body = InvoiceBody {
            external_id: &request.external_id,
            amount: request.amount,
            description: &request.description,
            payer_email: &request.customer.email,
            customer: &request.customer,
            success_redirect_url: format!("{}/payment/success", self.public_base_url),
            failure_redirect_url: format!("{}/payment/failed", self.public_base_url),
            payment_methods: request.method_hint.map(|m| [m]),
        };

        let response = self
            .client
            .post(format!("{}/v2/invoices", self.api_url))
            .basic_auth(&self.secret_key, Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {text}")));
        }

        response
            .json::<GatewayInvoice>()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}
