//! PostgreSQL-backed `IdentityGate` implementation.
//!
//! Registration hashes passwords with Argon2id before insertion; credential
//! verification parses the stored PHC hash and compares without revealing
//! whether the email or the password failed.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{IdentityGate, IdentityGateError};
use crate::domain::{LoginCredentials, SignupDetails, User, UserId};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{row_to_user, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the identity gate port.
#[derive(Clone)]
pub struct DieselIdentityGate {
    pool: DbPool,
}

impl DieselIdentityGate {
    /// Create a new gate with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> IdentityGateError {
    map_pool_error(error, IdentityGateError::connection)
}

fn map_diesel(error: diesel::result::Error) -> IdentityGateError {
    if is_unique_violation(&error) {
        return IdentityGateError::rejected("email or username already registered");
    }
    map_diesel_error(
        error,
        IdentityGateError::query,
        IdentityGateError::connection,
    )
}

fn convert_row(row: UserRow) -> Result<User, IdentityGateError> {
    row_to_user(row).map_err(IdentityGateError::query)
}

fn hash_password(password: &str) -> Result<String, IdentityGateError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| IdentityGateError::query(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, IdentityGateError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| IdentityGateError::query(format!("stored hash malformed: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(IdentityGateError::query(format!(
            "password verification failed: {err}"
        ))),
    }
}

#[async_trait]
impl IdentityGate for DieselIdentityGate {
    async fn register(&self, details: &SignupDetails) -> Result<User, IdentityGateError> {
        let password_hash = hash_password(details.password())?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            email: details.email().as_str(),
            username: details.username().as_str(),
            full_name: details.full_name().as_str(),
            role: details.role().as_str(),
            password_hash: &password_hash,
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        convert_row(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityGateError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(convert_row).transpose()
    }

    async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, IdentityGateError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::email.eq(credentials.email().as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Ok(None);
        };
        if !verify_password(credentials.password(), &row.password_hash)? {
            return Ok(None);
        }
        convert_row(row).map(Some)
    }
}
