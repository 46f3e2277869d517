//! In-memory port implementations shared by service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::auth::{LoginCredentials, SignupDetails};
use super::hackathon::{Hackathon, HackathonStatus, HackathonTitle, PrizePool};
use super::payment::{ClientSecret, PaymentIntentSpec};
use super::ports::{
    HackathonRepository, HackathonRepositoryError, IdentityGate, IdentityGateError,
    PaymentGateway, PaymentGatewayError, PublishOutcome, TeamRosterRepository,
    TeamRosterRepositoryError,
};
use super::roster::TeamMembership;
use super::user::{EmailAddress, FullName, User, UserId, UserRole, Username};

/// Identity gate over a fixed user set, with optional forced failure.
#[derive(Default)]
pub(crate) struct InMemoryIdentityGate {
    users: Mutex<HashMap<Uuid, User>>,
    fail_with: Mutex<Option<IdentityGateError>>,
}

impl InMemoryIdentityGate {
    pub(crate) fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (*user.id().as_uuid(), user))
            .collect();
        Self {
            users: Mutex::new(map),
            fail_with: Mutex::new(None),
        }
    }

    pub(crate) fn fail_next(&self, error: IdentityGateError) {
        *self.fail_with.lock().expect("gate poisoned") = Some(error);
    }

    fn take_failure(&self) -> Option<IdentityGateError> {
        self.fail_with.lock().expect("gate poisoned").take()
    }
}

#[async_trait]
impl IdentityGate for InMemoryIdentityGate {
    async fn register(&self, details: &SignupDetails) -> Result<User, IdentityGateError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut guard = self.users.lock().expect("gate poisoned");
        if guard
            .values()
            .any(|user| user.email() == details.email())
        {
            return Err(IdentityGateError::rejected("email already registered"));
        }
        let user = User::new(
            UserId::random(),
            details.email().clone(),
            details.username().clone(),
            details.full_name().clone(),
            details.role(),
        );
        guard.insert(*user.id().as_uuid(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityGateError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let guard = self.users.lock().expect("gate poisoned");
        Ok(guard.get(id.as_uuid()).cloned())
    }

    async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, IdentityGateError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let guard = self.users.lock().expect("gate poisoned");
        // Fixture semantics: the password is the local part of the email.
        let expected_password = credentials
            .email()
            .as_str()
            .split('@')
            .next()
            .unwrap_or_default();
        if credentials.password() != expected_password {
            return Ok(None);
        }
        Ok(guard
            .values()
            .find(|user| user.email() == credentials.email())
            .cloned())
    }
}

/// Hackathon store over a hash map, mirroring the conditional publish.
#[derive(Default)]
pub(crate) struct InMemoryHackathonRepository {
    store: Mutex<HashMap<Uuid, Hackathon>>,
    fail_with: Mutex<Option<HackathonRepositoryError>>,
}

impl InMemoryHackathonRepository {
    pub(crate) fn with_records(records: impl IntoIterator<Item = Hackathon>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (*record.id(), record))
            .collect();
        Self {
            store: Mutex::new(map),
            fail_with: Mutex::new(None),
        }
    }

    pub(crate) fn fail_next(&self, error: HackathonRepositoryError) {
        *self.fail_with.lock().expect("store poisoned") = Some(error);
    }

    fn take_failure(&self) -> Option<HackathonRepositoryError> {
        self.fail_with.lock().expect("store poisoned").take()
    }
}

#[async_trait]
impl HackathonRepository for InMemoryHackathonRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Hackathon>, HackathonRepositoryError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let guard = self.store.lock().expect("store poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn publish_draft(
        &self,
        id: &Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<PublishOutcome, HackathonRepositoryError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut guard = self.store.lock().expect("store poisoned");
        let Some(existing) = guard.get(id).cloned() else {
            return Ok(PublishOutcome::NotFound);
        };
        if !existing.is_draft() {
            return Ok(PublishOutcome::NotDraft(existing.status()));
        }
        let updated = Hackathon::new(
            *existing.id(),
            existing.title().clone(),
            existing.prize_pool(),
            HackathonStatus::Published,
            *existing.organizer_id(),
            existing.created_at(),
            published_at,
        );
        guard.insert(*id, updated.clone());
        Ok(PublishOutcome::Published(updated))
    }
}

/// Gateway that records specs and returns a canned secret or failure.
#[derive(Default)]
pub(crate) struct RecordingPaymentGateway {
    pub(crate) seen: Mutex<Vec<PaymentIntentSpec>>,
    fail_with: Mutex<Option<PaymentGatewayError>>,
}

impl RecordingPaymentGateway {
    pub(crate) fn fail_next(&self, error: PaymentGatewayError) {
        *self.fail_with.lock().expect("gateway poisoned") = Some(error);
    }
}

#[async_trait]
impl PaymentGateway for RecordingPaymentGateway {
    async fn create_intent(
        &self,
        spec: &PaymentIntentSpec,
    ) -> Result<ClientSecret, PaymentGatewayError> {
        if let Some(error) = self.fail_with.lock().expect("gateway poisoned").take() {
            return Err(error);
        }
        self.seen.lock().expect("gateway poisoned").push(spec.clone());
        ClientSecret::new("pi_test_secret").map_err(|err| PaymentGatewayError::decode(err.to_string()))
    }
}

/// Roster store returning fixed memberships per user.
#[derive(Default)]
pub(crate) struct InMemoryTeamRosterRepository {
    memberships: Mutex<HashMap<Uuid, Vec<TeamMembership>>>,
    fail_with: Mutex<Option<TeamRosterRepositoryError>>,
}

impl InMemoryTeamRosterRepository {
    pub(crate) fn with_memberships(user_id: &UserId, teams: Vec<TeamMembership>) -> Self {
        let mut map = HashMap::new();
        map.insert(*user_id.as_uuid(), teams);
        Self {
            memberships: Mutex::new(map),
            fail_with: Mutex::new(None),
        }
    }

    pub(crate) fn fail_next(&self, error: TeamRosterRepositoryError) {
        *self.fail_with.lock().expect("store poisoned") = Some(error);
    }
}

#[async_trait]
impl TeamRosterRepository for InMemoryTeamRosterRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TeamMembership>, TeamRosterRepositoryError> {
        if let Some(error) = self.fail_with.lock().expect("store poisoned").take() {
            return Err(error);
        }
        let guard = self.memberships.lock().expect("store poisoned");
        Ok(guard.get(user_id.as_uuid()).cloned().unwrap_or_default())
    }
}

/// Build a user fixture with the given role.
pub(crate) fn user_fixture(role: UserRole) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new("fixture@example.com").expect("fixture email"),
        Username::new("fixture_user").expect("fixture username"),
        FullName::new("Fixture User").expect("fixture name"),
        role,
    )
}

/// Build a draft hackathon fixture owned by `organizer`.
pub(crate) fn draft_fixture(organizer: UserId, prize_pool: f64) -> Hackathon {
    let now = Utc::now();
    Hackathon::new(
        Uuid::new_v4(),
        HackathonTitle::new("Fixture Hack").expect("fixture title"),
        PrizePool::new(prize_pool).expect("fixture pool"),
        HackathonStatus::Draft,
        organizer,
        now,
        now,
    )
}
