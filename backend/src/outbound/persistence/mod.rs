//! Diesel persistence adapters over PostgreSQL.

pub mod diesel_hackathon_repository;
pub mod diesel_identity_gate;
pub mod diesel_team_roster_repository;
pub mod error_mapping;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_hackathon_repository::DieselHackathonRepository;
pub use diesel_identity_gate::DieselIdentityGate;
pub use diesel_team_roster_repository::DieselTeamRosterRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
