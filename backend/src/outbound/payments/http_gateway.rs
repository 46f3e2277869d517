//! Reqwest-backed card processor adapter.
//!
//! Owns transport details only: form serialisation, timeout and HTTP error
//! mapping, and JSON decoding of the returned client secret. The processor
//! API is Stripe-shaped: a form-encoded `POST /v1/payment_intents`
//! authenticated with a bearer secret key, with reconciliation metadata
//! passed as `metadata[...]` fields.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{PaymentGateway, PaymentGatewayError};
use crate::domain::{ClientSecret, PaymentIntentSpec};

const INTENTS_PATH: &str = "v1/payment_intents";

/// Processor adapter performing HTTP POST requests against one endpoint.
pub struct PaymentHttpGateway {
    client: Client,
    endpoint: Url,
    secret_key: String,
}

impl PaymentHttpGateway {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot be joined or the reqwest
    /// client cannot be constructed.
    pub fn new(
        base_url: Url,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PaymentGatewayError> {
        let endpoint = base_url
            .join(INTENTS_PATH)
            .map_err(|err| PaymentGatewayError::transport(format!("invalid base URL: {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PaymentGatewayError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            secret_key: secret_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponseDto {
    client_secret: String,
}

#[async_trait]
impl PaymentGateway for PaymentHttpGateway {
    async fn create_intent(
        &self,
        spec: &PaymentIntentSpec,
    ) -> Result<ClientSecret, PaymentGatewayError> {
        let form = intent_form(spec);
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.secret_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_client_secret(body.as_ref())
    }
}

/// Serialise a spec into the processor's form encoding.
fn intent_form(spec: &PaymentIntentSpec) -> Vec<(String, String)> {
    let metadata = spec.metadata();
    vec![
        ("amount".to_owned(), spec.amount_minor_units().to_string()),
        ("currency".to_owned(), spec.currency().as_str().to_owned()),
        (
            "metadata[hackathon_title]".to_owned(),
            metadata.hackathon_title.as_str().to_owned(),
        ),
        (
            "metadata[prize_pool]".to_owned(),
            metadata.prize_pool.amount().to_string(),
        ),
        (
            "metadata[platform_fee]".to_owned(),
            metadata.platform_fee_minor_units.to_string(),
        ),
        (
            "metadata[organizer_id]".to_owned(),
            metadata.organizer_id.to_string(),
        ),
        (
            "metadata[organizer_email]".to_owned(),
            metadata.organizer_email.as_str().to_owned(),
        ),
    ]
}

fn parse_client_secret(body: &[u8]) -> Result<ClientSecret, PaymentGatewayError> {
    let decoded: IntentResponseDto = serde_json::from_slice(body).map_err(|error| {
        PaymentGatewayError::decode(format!("invalid intent response payload: {error}"))
    })?;
    ClientSecret::new(decoded.client_secret)
        .map_err(|error| PaymentGatewayError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    if error.is_timeout() {
        PaymentGatewayError::timeout(error.to_string())
    } else {
        PaymentGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PaymentGatewayError::timeout(message)
        }
        _ if status.is_client_error() => PaymentGatewayError::rejected(message),
        _ => PaymentGatewayError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
