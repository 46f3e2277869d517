//! Team roster read models.
//!
//! The roster is a typed projection over a statically-declared join of
//! membership, team, and hackathon records. The hackathon relation is
//! explicitly optional: a dangling reference surfaces as `None` rather than
//! failing the whole query or being accessed without a guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimal hackathon annotation carried on each roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonSummary {
    /// Hackathon identifier.
    pub id: Uuid,
    /// Hackathon title at query time.
    pub title: String,
}

/// One team the user belongs to, annotated with its hackathon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    /// Team identifier.
    pub team_id: Uuid,
    /// Team display name.
    pub team_name: String,
    /// The user's role within the team (free text, e.g. `leader`).
    pub member_role: String,
    /// When the user joined the team.
    pub joined_at: DateTime<Utc>,
    /// Total members currently on the team.
    pub member_count: i64,
    /// Owning hackathon, absent when the referenced record is gone.
    pub hackathon: Option<HackathonSummary>,
}

/// Roster response shape: the teams plus their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoster {
    /// Teams the user belongs to, newest join first.
    pub teams: Vec<TeamMembership>,
    /// Number of entries in `teams`.
    pub total: usize,
}

impl TeamRoster {
    /// Wrap a list of memberships, deriving the total.
    pub fn from_memberships(teams: Vec<TeamMembership>) -> Self {
        let total = teams.len();
        Self { teams, total }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn empty_roster_reports_zero_total() {
        let roster = TeamRoster::from_memberships(Vec::new());
        assert!(roster.teams.is_empty());
        assert_eq!(roster.total, 0);
    }

    #[rstest]
    fn total_tracks_entry_count() {
        let entry = TeamMembership {
            team_id: Uuid::new_v4(),
            team_name: "Rustaceans".to_owned(),
            member_role: "leader".to_owned(),
            joined_at: Utc::now(),
            member_count: 3,
            hackathon: None,
        };
        let roster = TeamRoster::from_memberships(vec![entry.clone(), entry]);
        assert_eq!(roster.total, 2);
    }

    #[rstest]
    fn missing_hackathon_serialises_as_null() {
        let entry = TeamMembership {
            team_id: Uuid::new_v4(),
            team_name: "Rustaceans".to_owned(),
            member_role: "member".to_owned(),
            joined_at: Utc::now(),
            member_count: 1,
            hackathon: None,
        };
        let value = serde_json::to_value(&entry).expect("entry serialises");
        assert!(value["hackathon"].is_null());
    }
}
