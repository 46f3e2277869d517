//! Application assembly: route registration, session middleware, and
//! startup migrations.

pub mod config;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::inbound::http::{hackathons, payments, teams, users};

pub use config::{secret_fingerprint, ConfigError, PaymentConfig, ServerConfig};

/// Embedded SQL migrations, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Register every REST endpoint on the given service config.
///
/// Shared between `main` and integration tests so both serve the identical
/// surface.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(hackathons::publish_hackathon)
        .service(payments::create_payment_intent)
        .service(teams::user_teams);
}

/// Build the cookie-session middleware used by every authenticated route.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Apply pending migrations over a short-lived synchronous connection.
pub fn run_migrations(database_url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| format!("failed to connect for migrations: {err}"))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("failed to run migrations: {err}"))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}
