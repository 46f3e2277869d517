//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API:
//! endpoint paths from the inbound layer, domain schemas, and the session
//! cookie security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    ClientSecret, Error, ErrorCode, Hackathon, HackathonStatus, HackathonSummary, TeamMembership,
    TeamRoster, User, UserRole,
};
use crate::inbound::http::payments::{CreateIntentRequest, CreateIntentResponse};
use crate::inbound::http::users::{LoginRequest, SignupRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HackHub backend API",
        description = "Fee-gated hackathon publishing, team rosters, and identity."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::hackathons::publish_hackathon,
        crate::inbound::http::payments::create_payment_intent,
        crate::inbound::http::teams::user_teams,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserRole,
        Hackathon,
        HackathonStatus,
        TeamRoster,
        TeamMembership,
        HackathonSummary,
        ClientSecret,
        SignupRequest,
        LoginRequest,
        CreateIntentRequest,
        CreateIntentResponse,
    )),
    tags(
        (name = "users", description = "Signup and session management"),
        (name = "hackathons", description = "Publish workflow"),
        (name = "payments", description = "Platform-fee payment intents"),
        (name = "teams", description = "Team roster queries")
    )
)]
pub struct ApiDoc;
