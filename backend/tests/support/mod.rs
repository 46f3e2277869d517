//! In-memory port implementations backing the HTTP flow tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use uuid::Uuid;

use hackhub_backend::domain::ports::{
    HackathonRepository, HackathonRepositoryError, IdentityGate, IdentityGateError,
    PaymentGateway, PaymentGatewayError, PublishOutcome, TeamRosterRepository,
    TeamRosterRepositoryError,
};
use hackhub_backend::domain::{
    ClientSecret, Hackathon, HackathonStatus, HackathonTitle, LoginCredentials,
    PaymentIntentSpec, PaymentIntentService, PrizePool, PublishService, RegistrationService,
    SignupDetails, TeamMembership, TeamRosterService, User, UserId,
};
use hackhub_backend::inbound::http::HttpState;

/// Identity gate recording registrations and their passwords.
#[derive(Default)]
pub struct FakeIdentityGate {
    users: Mutex<HashMap<Uuid, (User, String)>>,
}

#[async_trait]
impl IdentityGate for FakeIdentityGate {
    async fn register(&self, details: &SignupDetails) -> Result<User, IdentityGateError> {
        let mut guard = self.users.lock().expect("gate poisoned");
        if guard
            .values()
            .any(|(user, _)| user.email() == details.email())
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
        guard.insert(
            *user.id().as_uuid(),
            (user.clone(), details.password().to_owned()),
        );
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityGateError> {
        let guard = self.users.lock().expect("gate poisoned");
        Ok(guard.get(id.as_uuid()).map(|(user, _)| user.clone()))
    }

    async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, IdentityGateError> {
        let guard = self.users.lock().expect("gate poisoned");
        Ok(guard
            .values()
            .find(|(user, password)| {
                user.email() == credentials.email() && password == credentials.password()
            })
            .map(|(user, _)| user.clone()))
    }
}

/// Hackathon store with compare-and-swap publish semantics.
#[derive(Default)]
pub struct FakeHackathonRepository {
    store: Mutex<HashMap<Uuid, Hackathon>>,
}

impl FakeHackathonRepository {
    /// Seed a draft owned by `organizer` and return its id.
    pub fn seed_draft(&self, organizer: UserId, prize_pool: f64) -> Uuid {
        let now = Utc::now();
        let record = Hackathon::new(
            Uuid::new_v4(),
            HackathonTitle::new("AI for Good 2026").expect("title"),
            PrizePool::new(prize_pool).expect("pool"),
            HackathonStatus::Draft,
            organizer,
            now,
            now,
        );
        let id = *record.id();
        self.store.lock().expect("store poisoned").insert(id, record);
        id
    }
}

#[async_trait]
impl HackathonRepository for FakeHackathonRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Hackathon>, HackathonRepositoryError> {
        let guard = self.store.lock().expect("store poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn publish_draft(
        &self,
        id: &Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<PublishOutcome, HackathonRepositoryError> {
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

/// Gateway returning a canned client secret.
#[derive(Default)]
pub struct FakePaymentGateway;

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_intent(
        &self,
        _spec: &PaymentIntentSpec,
    ) -> Result<ClientSecret, PaymentGatewayError> {
        ClientSecret::new("pi_flow_secret")
            .map_err(|err| PaymentGatewayError::decode(err.to_string()))
    }
}

/// Roster store with no memberships.
#[derive(Default)]
pub struct EmptyRosterRepository;

#[async_trait]
impl TeamRosterRepository for EmptyRosterRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<TeamMembership>, TeamRosterRepositoryError> {
        Ok(Vec::new())
    }
}

/// Assemble the HTTP state over the fakes, exposing the hackathon store for
/// seeding.
pub fn flow_state() -> (HttpState, Arc<FakeIdentityGate>, Arc<FakeHackathonRepository>) {
    let gate = Arc::new(FakeIdentityGate::default());
    let hackathons = Arc::new(FakeHackathonRepository::default());
    let state = HttpState::new(
        Arc::new(RegistrationService::new(Arc::clone(&gate))),
        Arc::new(PublishService::new(
            Arc::clone(&hackathons),
            Arc::clone(&gate),
            Arc::new(DefaultClock),
        )),
        Arc::new(PaymentIntentService::new(
            Arc::new(FakePaymentGateway),
            Arc::clone(&gate),
        )),
        Arc::new(TeamRosterService::new(Arc::new(EmptyRosterRepository))),
    );
    (state, gate, hackathons)
}
