//! Publish workflow: the guarded DRAFT → PUBLISHED transition.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{error, info};
use uuid::Uuid;

use super::access::require_organizer;
use super::hackathon::Hackathon;
use super::ports::{
    HackathonPublisher, HackathonRepository, HackathonRepositoryError, IdentityGate,
    PublishOutcome,
};
use super::user::UserId;
use super::Error;

/// Publish service implementing the [`HackathonPublisher`] driving port.
///
/// Guards are evaluated in order and short-circuit: organiser role, record
/// existence, draft status. The status check and the update are one atomic
/// conditional write at the repository, so a concurrent publish of the same
/// record fails the draft guard rather than silently double-succeeding.
///
/// Publishing carries no dependency on payment: fee collection and the
/// status transition are two independently callable operations, linked only
/// by client-side sequencing.
#[derive(Clone)]
pub struct PublishService<R, I> {
    hackathons: Arc<R>,
    identity: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, I> PublishService<R, I> {
    /// Create a new publish service.
    pub fn new(hackathons: Arc<R>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            hackathons,
            identity,
            clock,
        }
    }
}

fn map_repository_error(err: HackathonRepositoryError) -> Error {
    error!(error = %err, "hackathon store failure");
    Error::internal("hackathon store unavailable")
}

impl<R, I> PublishService<R, I>
where
    R: HackathonRepository,
    I: IdentityGate,
{
    async fn perform_publish(
        &self,
        hackathon_id: &Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<Hackathon, Error> {
        let outcome = self
            .hackathons
            .publish_draft(hackathon_id, published_at)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            PublishOutcome::Published(hackathon) => {
                info!(hackathon_id = %hackathon_id, "hackathon published");
                Ok(hackathon)
            }
            PublishOutcome::NotFound => {
                Err(Error::not_found(format!("hackathon {hackathon_id} not found")))
            }
            PublishOutcome::NotDraft(status) => Err(Error::invalid_request(
                "hackathon is not in draft status",
            )
            .with_details(serde_json::json!({ "status": status }))),
        }
    }
}

#[async_trait]
impl<R, I> HackathonPublisher for PublishService<R, I>
where
    R: HackathonRepository,
    I: IdentityGate,
{
    async fn publish(&self, actor: &UserId, hackathon_id: &Uuid) -> Result<Hackathon, Error> {
        require_organizer(&self.identity, actor).await?;
        self.perform_publish(hackathon_id, self.clock.utc()).await
    }
}

#[cfg(test)]
#[path = "publish_service_tests.rs"]
mod tests;
