//! Hackathon publish handler.

use actix_web::{patch, web};
use uuid::Uuid;

use crate::domain::{Error, Hackathon};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Publish a draft hackathon.
///
/// The transition is one-way and guarded: organiser role, record existence,
/// then draft status, each failing with its own error. Publishing an
/// already-published record fails; it never no-ops silently.
#[utoipa::path(
    patch,
    path = "/hackathons/{id}/publish",
    params(
        ("id" = Uuid, Path, description = "Hackathon identifier")
    ),
    responses(
        (status = 200, description = "Updated hackathon", body = Hackathon),
        (status = 400, description = "Not in draft status", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Organizer role required", body = Error),
        (status = 404, description = "Hackathon not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["hackathons"],
    operation_id = "publishHackathon"
)]
#[patch("/hackathons/{id}/publish")]
pub async fn publish_hackathon(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Hackathon>> {
    let actor = session.require_user_id()?;
    let hackathon_id = path.into_inner();
    let published = state.publisher.publish(&actor, &hackathon_id).await?;
    Ok(web::Json(published))
}
