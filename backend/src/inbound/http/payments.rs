//! Payment intent handler.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::CreateIntentCommand;
use crate::domain::{ClientSecret, Error, HackathonTitle, PrizePool};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Create-intent request body for `POST /payment/create-intent`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    /// Platform fee the client expects to pay, in minor units.
    pub amount: i64,
    /// Hackathon being paid for.
    pub hackathon_title: String,
    /// Prize pool in major units; the fee is recomputed from this.
    pub prize_pool: f64,
}

impl TryFrom<CreateIntentRequest> for CreateIntentCommand {
    type Error = Error;

    fn try_from(value: CreateIntentRequest) -> Result<Self, Self::Error> {
        let hackathon_title = HackathonTitle::new(&value.hackathon_title).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "hackathonTitle" }))
        })?;
        let prize_pool = PrizePool::new(value.prize_pool).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "prizePool" }))
        })?;
        Ok(Self {
            amount_minor_units: value.amount,
            hackathon_title,
            prize_pool,
        })
    }
}

/// Response carrying the processor's client secret.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    /// Opaque token the browser uses to complete payment authorisation.
    pub client_secret: ClientSecret,
}

/// Create a platform-fee payment intent at the card processor.
///
/// The amount is checked against the computed fee with strict equality; a
/// mismatch means client-side tampering or stale UI state.
#[utoipa::path(
    post,
    path = "/payment/create-intent",
    request_body = CreateIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = CreateIntentResponse),
        (status = 400, description = "Invalid payment amount", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Organizer role required", body = Error),
        (status = 500, description = "Processor failure", body = Error)
    ),
    tags = ["payments"],
    operation_id = "createPaymentIntent"
)]
#[post("/payment/create-intent")]
pub async fn create_payment_intent(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIntentRequest>,
) -> ApiResult<web::Json<CreateIntentResponse>> {
    let actor = session.require_user_id()?;
    let command = CreateIntentCommand::try_from(payload.into_inner())?;
    let client_secret = state.payments.create_intent(&actor, command).await?;
    Ok(web::Json(CreateIntentResponse { client_secret }))
}
