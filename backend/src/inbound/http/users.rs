//! Signup and login handlers.
//!
//! ```text
//! POST /signup {"email":"ada@example.com","password":"secret1","username":"ada","fullName":"Ada L"}
//! POST /login  {"email":"ada@example.com","password":"secret1"}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError, User,
    UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
    /// Optional role; defaults to `PARTICIPANT` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.email,
            &value.password,
            &value.username,
            &value.full_name,
            value.role.as_deref(),
        )
    }
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    let field = match &err {
        SignupValidationError::PasswordTooShort { .. } => "password",
        SignupValidationError::User(user_err) => match user_err {
            UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => "email",
            UserValidationError::UsernameTooShort { .. }
            | UserValidationError::UsernameTooLong { .. }
            | UserValidationError::UsernameInvalidCharacters => "username",
            UserValidationError::EmptyFullName | UserValidationError::FullNameTooLong { .. } => {
                "fullName"
            }
            UserValidationError::UnknownRole => "role",
            UserValidationError::InvalidId => "id",
        },
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a new user through the identity gate.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Missing or invalid fields, or provider rejection", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<User>> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let user = state.registration.sign_up(details).await?;
    Ok(web::Json(user))
}

/// Login request body for `POST /login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => Error::invalid_request("email must be a valid address")
            .with_details(json!({ "field": "email" })),
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password" }))
        }
    }
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.registration.authenticate(credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().finish())
}
