//! Principal resolution helpers shared by the privileged services.

use std::sync::Arc;

use tracing::error;

use super::ports::{IdentityGate, IdentityGateError};
use super::user::{User, UserId};
use super::Error;

/// Map identity provider failures to a generic domain error, logging the
/// underlying cause server-side.
pub(crate) fn map_identity_error(err: IdentityGateError) -> Error {
    match err {
        IdentityGateError::Rejected { message } => Error::invalid_request(message),
        other => {
            error!(error = %other, "identity provider failure");
            Error::internal("identity provider unavailable")
        }
    }
}

/// Resolve the user behind a session principal.
///
/// A principal that no longer maps to a user is treated as an expired
/// session, not an internal fault.
pub(crate) async fn resolve_user<I>(identity: &Arc<I>, actor: &UserId) -> Result<User, Error>
where
    I: IdentityGate + ?Sized,
{
    identity
        .find_by_id(actor)
        .await
        .map_err(map_identity_error)?
        .ok_or_else(|| Error::unauthorized("login required"))
}

/// Resolve the user and require the organiser role.
pub(crate) async fn require_organizer<I>(identity: &Arc<I>, actor: &UserId) -> Result<User, Error>
where
    I: IdentityGate + ?Sized,
{
    let user = resolve_user(identity, actor).await?;
    if !user.is_organizer() {
        return Err(Error::forbidden("organizer role required"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::auth::{LoginCredentials, SignupDetails};
    use crate::domain::user::{EmailAddress, FullName, UserRole, Username};
    use crate::domain::ErrorCode;

    struct SingleUserGate {
        user: User,
    }

    #[async_trait]
    impl IdentityGate for SingleUserGate {
        async fn register(&self, _details: &SignupDetails) -> Result<User, IdentityGateError> {
            Err(IdentityGateError::query("not under test"))
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityGateError> {
            Ok((self.user.id() == id).then(|| self.user.clone()))
        }

        async fn verify_credentials(
            &self,
            _credentials: &LoginCredentials,
        ) -> Result<Option<User>, IdentityGateError> {
            Ok(None)
        }
    }

    fn user_with_role(role: UserRole) -> User {
        User::new(
            UserId::random(),
            EmailAddress::new("who@example.com").expect("email"),
            Username::new("who_1").expect("username"),
            FullName::new("Who Ever").expect("name"),
            role,
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_principal_is_unauthorised() {
        let gate: Arc<SingleUserGate> = Arc::new(SingleUserGate {
            user: user_with_role(UserRole::Organizer),
        });
        let err = resolve_user(&gate, &UserId::random())
            .await
            .expect_err("unknown principal must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn participants_are_forbidden_from_organizer_actions() {
        let user = user_with_role(UserRole::Participant);
        let actor = *user.id();
        let gate: Arc<SingleUserGate> = Arc::new(SingleUserGate { user });
        let err = require_organizer(&gate, &actor)
            .await
            .expect_err("participant must be forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[actix_web::test]
    async fn organizers_pass_the_role_gate() {
        let user = user_with_role(UserRole::Organizer);
        let actor = *user.id();
        let gate: Arc<SingleUserGate> = Arc::new(SingleUserGate { user });
        let resolved = require_organizer(&gate, &actor)
            .await
            .expect("organizer must pass");
        assert_eq!(resolved.id(), &actor);
    }

    #[rstest]
    fn rejection_messages_surface_to_clients() {
        let err = map_identity_error(IdentityGateError::rejected("email already registered"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "email already registered");
    }

    #[rstest]
    fn infrastructure_failures_are_generic() {
        let err = map_identity_error(IdentityGateError::connection("refused"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message().contains("refused"));
    }
}
