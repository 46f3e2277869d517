//! Diesel row structs and their conversions into domain types.
//!
//! Rows hold raw column values; conversion into validated domain aggregates
//! happens through the domain constructors so malformed stored data is
//! surfaced as a query error rather than propagated silently.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, FullName, Hackathon, HackathonStatus, HackathonTitle, PrizePool, User, UserId,
    UserRole, Username,
};

use super::schema::{hackathons, users};

/// Row shape for `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for `users`.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub username: &'a str,
    pub full_name: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
}

/// Convert a stored user row into a validated domain user.
pub fn row_to_user(row: UserRow) -> Result<User, String> {
    let UserRow {
        id,
        email,
        username,
        full_name,
        role,
        password_hash: _,
        created_at: _,
        updated_at: _,
    } = row;

    let email = EmailAddress::new(&email).map_err(|err| format!("stored email: {err}"))?;
    let username = Username::new(&username).map_err(|err| format!("stored username: {err}"))?;
    let full_name = FullName::new(&full_name).map_err(|err| format!("stored full name: {err}"))?;
    let role = role
        .parse::<UserRole>()
        .map_err(|err| format!("stored role: {err}"))?;
    Ok(User::new(
        UserId::from_uuid(id),
        email,
        username,
        full_name,
        role,
    ))
}

/// Row shape for `hackathons`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hackathons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HackathonRow {
    pub id: Uuid,
    pub title: String,
    pub prize_pool: f64,
    pub status: String,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert a stored hackathon row into a validated domain aggregate.
pub fn row_to_hackathon(row: HackathonRow) -> Result<Hackathon, String> {
    let HackathonRow {
        id,
        title,
        prize_pool,
        status,
        organizer_id,
        created_at,
        updated_at,
    } = row;

    let title = HackathonTitle::new(&title).map_err(|err| format!("stored title: {err}"))?;
    let prize_pool =
        PrizePool::new(prize_pool).map_err(|err| format!("stored prize pool: {err}"))?;
    let status = status
        .parse::<HackathonStatus>()
        .map_err(|err| format!("stored status: {err}"))?;
    Ok(Hackathon::new(
        id,
        title,
        prize_pool,
        status,
        UserId::from_uuid(organizer_id),
        created_at,
        updated_at,
    ))
}
