//! Team roster query service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use super::ports::{TeamRosterQuery, TeamRosterRepository, TeamRosterRepositoryError};
use super::roster::TeamRoster;
use super::user::UserId;
use super::Error;

/// Roster service implementing the [`TeamRosterQuery`] driving port.
#[derive(Clone)]
pub struct TeamRosterService<R> {
    roster: Arc<R>,
}

impl<R> TeamRosterService<R> {
    /// Create a new roster service.
    pub fn new(roster: Arc<R>) -> Self {
        Self { roster }
    }
}

fn map_repository_error(err: TeamRosterRepositoryError) -> Error {
    error!(error = %err, "team roster store failure");
    Error::internal("team roster unavailable")
}

#[async_trait]
impl<R> TeamRosterQuery for TeamRosterService<R>
where
    R: TeamRosterRepository,
{
    async fn roster_for_user(&self, user_id: &UserId) -> Result<TeamRoster, Error> {
        let teams = self
            .roster
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(TeamRoster::from_memberships(teams))
    }
}
