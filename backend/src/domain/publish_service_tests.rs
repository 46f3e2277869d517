//! Behaviour coverage for the publish workflow guards.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::hackathon::HackathonStatus;
use crate::domain::test_support::{
    draft_fixture, user_fixture, InMemoryHackathonRepository, InMemoryIdentityGate,
};
use crate::domain::user::UserRole;
use crate::domain::ErrorCode;

fn service(
    repo: Arc<InMemoryHackathonRepository>,
    gate: Arc<InMemoryIdentityGate>,
) -> PublishService<InMemoryHackathonRepository, InMemoryIdentityGate> {
    PublishService::new(repo, gate, Arc::new(DefaultClock))
}

#[rstest]
#[actix_web::test]
async fn organizer_publishes_a_draft() {
    let organizer = user_fixture(UserRole::Organizer);
    let actor = *organizer.id();
    let record = draft_fixture(actor, 1000.0);
    let id = *record.id();
    let repo = Arc::new(InMemoryHackathonRepository::with_records([record]));
    let gate = Arc::new(InMemoryIdentityGate::with_users([organizer]));

    let published = service(Arc::clone(&repo), gate)
        .publish(&actor, &id)
        .await
        .expect("publish succeeds");

    assert_eq!(published.status(), HackathonStatus::Published);
    let stored = repo
        .find_by_id(&id)
        .await
        .expect("lookup succeeds")
        .expect("record persists");
    assert_eq!(stored.status(), HackathonStatus::Published);
    assert!(stored.updated_at() >= stored.created_at());
}

#[rstest]
#[actix_web::test]
async fn republishing_fails_rather_than_noop() {
    let organizer = user_fixture(UserRole::Organizer);
    let actor = *organizer.id();
    let record = draft_fixture(actor, 1000.0);
    let id = *record.id();
    let repo = Arc::new(InMemoryHackathonRepository::with_records([record]));
    let gate = Arc::new(InMemoryIdentityGate::with_users([organizer]));
    let svc = service(repo, gate);

    svc.publish(&actor, &id).await.expect("first publish succeeds");
    let err = svc
        .publish(&actor, &id)
        .await
        .expect_err("second publish must fail");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "hackathon is not in draft status");
}

#[rstest]
#[case(HackathonStatus::Completed)]
#[case(HackathonStatus::Cancelled)]
#[actix_web::test]
async fn non_draft_states_fail_the_guard(#[case] status: HackathonStatus) {
    let organizer = user_fixture(UserRole::Organizer);
    let actor = *organizer.id();
    let record = draft_fixture(actor, 500.0);
    let id = *record.id();
    // Re-shape the fixture into the non-draft state under test.
    let record = crate::domain::hackathon::Hackathon::new(
        id,
        record.title().clone(),
        record.prize_pool(),
        status,
        actor,
        record.created_at(),
        record.updated_at(),
    );
    let repo = Arc::new(InMemoryHackathonRepository::with_records([record]));
    let gate = Arc::new(InMemoryIdentityGate::with_users([organizer]));

    let err = service(repo, gate)
        .publish(&actor, &id)
        .await
        .expect_err("non-draft publish must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[actix_web::test]
async fn participants_cannot_publish() {
    let participant = user_fixture(UserRole::Participant);
    let actor = *participant.id();
    let record = draft_fixture(actor, 500.0);
    let id = *record.id();
    let repo = Arc::new(InMemoryHackathonRepository::with_records([record]));
    let gate = Arc::new(InMemoryIdentityGate::with_users([participant]));

    let err = service(repo, gate)
        .publish(&actor, &id)
        .await
        .expect_err("participant must be forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[actix_web::test]
async fn unknown_session_principal_is_unauthorised() {
    let repo = Arc::new(InMemoryHackathonRepository::default());
    let gate = Arc::new(InMemoryIdentityGate::default());

    let err = service(repo, gate)
        .publish(&crate::domain::user::UserId::random(), &Uuid::new_v4())
        .await
        .expect_err("unknown principal must fail");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[actix_web::test]
async fn missing_hackathon_is_not_found() {
    let organizer = user_fixture(UserRole::Organizer);
    let actor = *organizer.id();
    let repo = Arc::new(InMemoryHackathonRepository::default());
    let gate = Arc::new(InMemoryIdentityGate::with_users([organizer]));

    let err = service(repo, gate)
        .publish(&actor, &Uuid::new_v4())
        .await
        .expect_err("missing record must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[actix_web::test]
async fn role_guard_runs_before_existence_check() {
    // A participant publishing a missing id must see 403, not 404: the
    // guards short-circuit in order.
    let participant = user_fixture(UserRole::Participant);
    let actor = *participant.id();
    let repo = Arc::new(InMemoryHackathonRepository::default());
    let gate = Arc::new(InMemoryIdentityGate::with_users([participant]));

    let err = service(repo, gate)
        .publish(&actor, &Uuid::new_v4())
        .await
        .expect_err("participant must be forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[actix_web::test]
async fn store_failures_surface_as_generic_internal_errors() {
    let organizer = user_fixture(UserRole::Organizer);
    let actor = *organizer.id();
    let record = draft_fixture(actor, 500.0);
    let id = *record.id();
    let repo = Arc::new(InMemoryHackathonRepository::with_records([record]));
    repo.fail_next(crate::domain::ports::HackathonRepositoryError::connection(
        "refused",
    ));
    let gate = Arc::new(InMemoryIdentityGate::with_users([organizer]));

    let err = service(repo, gate)
        .publish(&actor, &id)
        .await
        .expect_err("store failure must surface");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(!err.message().contains("refused"));
}
