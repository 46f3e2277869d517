//! Signup and login orchestration over the identity gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::access::map_identity_error;
use super::auth::{LoginCredentials, SignupDetails};
use super::ports::{IdentityGate, Registration};
use super::user::User;
use super::Error;

/// Registration service implementing the [`Registration`] driving port.
///
/// Local field validation has already happened by the time
/// [`SignupDetails`] exists; only the provider decides availability, and its
/// rejection messages are surfaced verbatim as validation errors.
#[derive(Clone)]
pub struct RegistrationService<I> {
    identity: Arc<I>,
}

impl<I> RegistrationService<I> {
    /// Create a new registration service.
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<I> Registration for RegistrationService<I>
where
    I: IdentityGate,
{
    async fn sign_up(&self, details: SignupDetails) -> Result<User, Error> {
        let user = self
            .identity
            .register(&details)
            .await
            .map_err(map_identity_error)?;
        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: LoginCredentials) -> Result<User, Error> {
        self.identity
            .verify_credentials(&credentials)
            .await
            .map_err(map_identity_error)?
            .ok_or_else(|| Error::unauthorized("invalid email or password"))
    }
}
