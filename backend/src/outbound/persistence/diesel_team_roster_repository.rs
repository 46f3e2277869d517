//! PostgreSQL-backed `TeamRosterRepository` implementation.
//!
//! The roster is a statically-declared join: membership rows inner-join
//! their team and left-join the team's hackathon, so a dangling hackathon
//! reference projects to `None` instead of failing the query. Member counts
//! come from a second grouped query over the collected team ids.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TeamRosterRepository, TeamRosterRepositoryError};
use crate::domain::roster::{HackathonSummary, TeamMembership};
use crate::domain::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{hackathons, team_members, teams};

/// Diesel-backed implementation of the roster port.
#[derive(Clone)]
pub struct DieselTeamRosterRepository {
    pool: DbPool,
}

impl DieselTeamRosterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> TeamRosterRepositoryError {
    map_pool_error(error, TeamRosterRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> TeamRosterRepositoryError {
    map_diesel_error(
        error,
        TeamRosterRepositoryError::query,
        TeamRosterRepositoryError::connection,
    )
}

/// Joined row: membership columns, team columns, optional hackathon columns.
type RosterJoinRow = (
    String,
    DateTime<Utc>,
    Uuid,
    String,
    Option<(Uuid, String)>,
);

fn assemble_entry(row: RosterJoinRow, counts: &HashMap<Uuid, i64>) -> TeamMembership {
    let (member_role, joined_at, team_id, team_name, hackathon) = row;
    TeamMembership {
        team_id,
        team_name,
        member_role,
        joined_at,
        member_count: counts.get(&team_id).copied().unwrap_or(0),
        hackathon: hackathon.map(|(id, title)| HackathonSummary { id, title }),
    }
}

#[async_trait]
impl TeamRosterRepository for DieselTeamRosterRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TeamMembership>, TeamRosterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RosterJoinRow> = team_members::table
            .inner_join(teams::table)
            .left_join(hackathons::table.on(teams::hackathon_id.eq(hackathons::id)))
            .filter(team_members::user_id.eq(user_id.as_uuid()))
            .order(team_members::joined_at.desc())
            .select((
                team_members::role,
                team_members::joined_at,
                teams::id,
                teams::name,
                (hackathons::id, hackathons::title).nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let team_ids: Vec<Uuid> = rows.iter().map(|row| row.2).collect();
        let counts: HashMap<Uuid, i64> = if team_ids.is_empty() {
            HashMap::new()
        } else {
            team_members::table
                .filter(team_members::team_id.eq_any(&team_ids))
                .group_by(team_members::team_id)
                .select((team_members::team_id, diesel::dsl::count_star()))
                .load::<(Uuid, i64)>(&mut conn)
                .await
                .map_err(map_diesel)?
                .into_iter()
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|row| assemble_entry(row, &counts))
            .collect())
    }
}
