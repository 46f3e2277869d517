//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use mockable::DefaultClock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::test_support::{
    draft_fixture, InMemoryHackathonRepository, InMemoryIdentityGate,
    InMemoryTeamRosterRepository, RecordingPaymentGateway,
};
use crate::domain::{
    EmailAddress, FullName, PaymentIntentService, PublishService, RegistrationService,
    TeamRosterService, User, UserId, UserRole, Username,
};
use crate::inbound::http::state::HttpState;

/// Seeded organiser; the fixture gate accepts the email's local part as the
/// password, so this account logs in with `org`.
pub(crate) const FIXTURE_ORGANIZER_EMAIL: &str = "org@example.com";
/// Seeded participant; logs in with `part`.
pub(crate) const FIXTURE_PARTICIPANT_EMAIL: &str = "part@example.com";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

fn seeded_user(email: &str, username: &str, role: UserRole) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new(email).expect("fixture email"),
        Username::new(username).expect("fixture username"),
        FullName::new("Fixture Person").expect("fixture name"),
        role,
    )
}

fn assemble_state(
    gate: Arc<InMemoryIdentityGate>,
    hackathons: Arc<InMemoryHackathonRepository>,
) -> HttpState {
    HttpState::new(
        Arc::new(RegistrationService::new(Arc::clone(&gate))),
        Arc::new(PublishService::new(
            hackathons,
            Arc::clone(&gate),
            Arc::new(DefaultClock),
        )),
        Arc::new(PaymentIntentService::new(
            Arc::new(RecordingPaymentGateway::default()),
            gate,
        )),
        Arc::new(TeamRosterService::new(Arc::new(
            InMemoryTeamRosterRepository::default(),
        ))),
    )
}

/// Fixture state over in-memory ports, seeded with three accounts.
pub(crate) fn fixture_state() -> HttpState {
    let gate = Arc::new(InMemoryIdentityGate::with_users([
        seeded_user(FIXTURE_ORGANIZER_EMAIL, "org_user", UserRole::Organizer),
        seeded_user(FIXTURE_PARTICIPANT_EMAIL, "part_user", UserRole::Participant),
        seeded_user("fixture@example.com", "fixture_user", UserRole::Participant),
    ]));
    assemble_state(gate, Arc::new(InMemoryHackathonRepository::default()))
}

/// Fixture state plus one draft hackathon owned by the seeded organiser.
pub(crate) fn fixture_state_with_draft() -> (HttpState, Uuid) {
    let organizer = seeded_user(FIXTURE_ORGANIZER_EMAIL, "org_user", UserRole::Organizer);
    let draft = draft_fixture(*organizer.id(), 5000.0);
    let draft_id = *draft.id();
    let gate = Arc::new(InMemoryIdentityGate::with_users([
        organizer,
        seeded_user(FIXTURE_PARTICIPANT_EMAIL, "part_user", UserRole::Participant),
    ]));
    let repo = Arc::new(InMemoryHackathonRepository::with_records([draft]));
    (assemble_state(gate, repo), draft_id)
}

/// Log in through `POST /login` and return the issued session cookie.
pub(crate) async fn login_cookie<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let password = email.split('@').next().unwrap_or_default();
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_success(),
        "fixture login must succeed, got {}",
        res.status()
    );
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
