//! Payment intent creation gated on role and strict fee validation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::access::require_organizer;
use super::fees::platform_fee_minor_units;
use super::payment::{ClientSecret, PaymentIntentSpec, PaymentMetadata};
use super::ports::{
    CreateIntentCommand, IdentityGate, PaymentGateway, PaymentGatewayError, PaymentIntents,
};
use super::user::UserId;
use super::Error;

/// Payment service implementing the [`PaymentIntents`] driving port.
///
/// The client-claimed amount must equal the computed platform fee exactly;
/// any difference signals client-side tampering or stale UI state and is
/// rejected before the processor is contacted. Processor failures are
/// indistinguishable to the caller (amount/currency problems and network
/// faults all surface as a generic dependency failure), with the underlying
/// cause logged server-side.
#[derive(Clone)]
pub struct PaymentIntentService<G, I> {
    gateway: Arc<G>,
    identity: Arc<I>,
}

impl<G, I> PaymentIntentService<G, I> {
    /// Create a new payment service.
    pub fn new(gateway: Arc<G>, identity: Arc<I>) -> Self {
        Self { gateway, identity }
    }
}

fn map_gateway_error(err: PaymentGatewayError) -> Error {
    error!(error = %err, "payment processor failure");
    Error::internal("payment processing failed")
}

#[async_trait]
impl<G, I> PaymentIntents for PaymentIntentService<G, I>
where
    G: PaymentGateway,
    I: IdentityGate,
{
    async fn create_intent(
        &self,
        actor: &UserId,
        command: CreateIntentCommand,
    ) -> Result<ClientSecret, Error> {
        let organizer = require_organizer(&self.identity, actor).await?;

        let expected = platform_fee_minor_units(command.prize_pool);
        if command.amount_minor_units != expected {
            return Err(Error::invalid_request("Invalid payment amount")
                .with_details(serde_json::json!({
                    "expectedMinorUnits": expected,
                    "providedMinorUnits": command.amount_minor_units,
                })));
        }

        let metadata = PaymentMetadata {
            hackathon_title: command.hackathon_title,
            prize_pool: command.prize_pool,
            platform_fee_minor_units: expected,
            organizer_id: *organizer.id(),
            organizer_email: organizer.email().clone(),
        };
        let spec = PaymentIntentSpec::new(expected, metadata)
            .map_err(|err| Error::internal(format!("invalid intent spec: {err}")))?;

        let secret = self
            .gateway
            .create_intent(&spec)
            .await
            .map_err(map_gateway_error)?;
        info!(
            amount_minor_units = expected,
            organizer_id = %organizer.id(),
            "payment intent created"
        );
        Ok(secret)
    }
}

#[cfg(test)]
#[path = "payment_service_tests.rs"]
mod tests;
