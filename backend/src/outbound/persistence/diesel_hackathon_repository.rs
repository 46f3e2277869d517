//! PostgreSQL-backed `HackathonRepository` implementation using Diesel.
//!
//! The publish operation is a single conditional update: the status guard
//! and the write execute as one statement, so concurrent publishers of the
//! same record cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{HackathonRepository, HackathonRepositoryError, PublishOutcome};
use crate::domain::{Hackathon, HackathonStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{row_to_hackathon, HackathonRow};
use super::pool::{DbPool, PoolError};
use super::schema::hackathons;

/// Diesel-backed implementation of the hackathon repository port.
#[derive(Clone)]
pub struct DieselHackathonRepository {
    pool: DbPool,
}

impl DieselHackathonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> HackathonRepositoryError {
    map_pool_error(error, HackathonRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> HackathonRepositoryError {
    map_diesel_error(
        error,
        HackathonRepositoryError::query,
        HackathonRepositoryError::connection,
    )
}

fn convert_row(row: HackathonRow) -> Result<Hackathon, HackathonRepositoryError> {
    row_to_hackathon(row).map_err(HackathonRepositoryError::query)
}

#[async_trait]
impl HackathonRepository for DieselHackathonRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Hackathon>, HackathonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = hackathons::table
            .filter(hackathons::id.eq(id))
            .select(HackathonRow::as_select())
            .first::<HackathonRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(convert_row).transpose()
    }

    async fn publish_draft(
        &self,
        id: &Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<PublishOutcome, HackathonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Compare-and-swap on status: zero rows means the record is either
        // missing or no longer a draft; a follow-up read disambiguates.
        let updated = diesel::update(
            hackathons::table.filter(
                hackathons::id
                    .eq(id)
                    .and(hackathons::status.eq(HackathonStatus::Draft.as_str())),
            ),
        )
        .set((
            hackathons::status.eq(HackathonStatus::Published.as_str()),
            hackathons::updated_at.eq(published_at),
        ))
        .returning(HackathonRow::as_returning())
        .get_result::<HackathonRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        if let Some(row) = updated {
            return convert_row(row).map(PublishOutcome::Published);
        }

        let current = hackathons::table
            .filter(hackathons::id.eq(id))
            .select(HackathonRow::as_select())
            .first::<HackathonRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        match current {
            None => Ok(PublishOutcome::NotFound),
            Some(row) => {
                let status = row
                    .status
                    .parse::<HackathonStatus>()
                    .map_err(|err| HackathonRepositoryError::query(err.to_string()))?;
                Ok(PublishOutcome::NotDraft(status))
            }
        }
    }
}
