//! Team roster handler.

use actix_web::{get, web};

use crate::domain::{Error, TeamRoster};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List the current user's teams with hackathon annotations.
///
/// A user with zero memberships receives an empty roster, never an error.
#[utoipa::path(
    get,
    path = "/teams/user",
    responses(
        (status = 200, description = "Roster for the session user", body = TeamRoster),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teams"],
    operation_id = "userTeams"
)]
#[get("/teams/user")]
pub async fn user_teams(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TeamRoster>> {
    let user_id = session.require_user_id()?;
    let roster = state.roster.roster_for_user(&user_id).await?;
    Ok(web::Json(roster))
}

#[cfg(test)]
mod tests {
    //! Endpoint coverage for the roster query.
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{
        fixture_state, login_cookie, test_session_middleware, FIXTURE_ORGANIZER_EMAIL,
    };

    #[rstest]
    #[actix_web::test]
    async fn missing_session_is_401() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .wrap(test_session_middleware())
                .service(user_teams),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/teams/user").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn zero_memberships_return_an_empty_roster() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .wrap(test_session_middleware())
                .service(crate::inbound::http::users::login)
                .service(user_teams),
        )
        .await;
        let cookie = login_cookie(&app, FIXTURE_ORGANIZER_EMAIL).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/teams/user")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "teams": [], "total": 0 }));
    }
}
