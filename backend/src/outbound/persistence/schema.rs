//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, lowercased email address.
        email -> Varchar,
        /// Unique public handle.
        username -> Varchar,
        /// Display name.
        full_name -> Varchar,
        /// Platform role token (`participant` or `organizer`).
        role -> Varchar,
        /// Argon2id PHC-format password hash.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hackathon records with their lifecycle status.
    hackathons (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Hackathon title (max 200 characters).
        title -> Varchar,
        /// Prize pool in major currency units.
        prize_pool -> Float8,
        /// Lifecycle status token (`draft`, `published`, `completed`,
        /// `cancelled`).
        status -> Varchar,
        /// Owning organiser.
        organizer_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Stamped by the publish workflow.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teams formed within a hackathon.
    teams (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Hackathon the team belongs to.
        hackathon_id -> Uuid,
        /// Team display name.
        name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership join table.
    team_members (team_id, user_id) {
        /// Team the membership belongs to.
        team_id -> Uuid,
        /// Member user.
        user_id -> Uuid,
        /// Role within the team (free text, e.g. `leader`).
        role -> Varchar,
        /// When the user joined.
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(teams -> hackathons (hackathon_id));
diesel::joinable!(team_members -> teams (team_id));
diesel::joinable!(team_members -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, hackathons, teams, team_members);
