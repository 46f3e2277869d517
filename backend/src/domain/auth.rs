//! Authentication and registration payloads.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, FullName, UserRole, UserValidationError, Username};

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the identity gate.
///
/// ## Invariants
/// - `email` is a validated, normalised address;
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Examples
    /// ```
    /// use hackhub_backend::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts("ada@example.com", "hunter2").unwrap();
    /// assert_eq!(creds.email().as_str(), "ada@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Address used for the credential lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors raised while assembling a [`SignupDetails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// A user field failed its own validation.
    User(UserValidationError),
    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    PasswordTooShort { min: usize },
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated signup payload handed to the identity gate.
///
/// The omitted-role default is `PARTICIPANT`; only the provider decides
/// whether the email/username are actually available.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    email: EmailAddress,
    password: Zeroizing<String>,
    username: Username,
    full_name: FullName,
    role: UserRole,
}

impl SignupDetails {
    /// Validate raw signup fields.
    ///
    /// `role` is the raw optional field from the request; absence defaults
    /// to [`UserRole::Participant`].
    pub fn try_from_parts(
        email: &str,
        password: &str,
        username: &str,
        full_name: &str,
        role: Option<&str>,
    ) -> Result<Self, SignupValidationError> {
        let email = EmailAddress::new(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignupValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let username = Username::new(username)?;
        let full_name = FullName::new(full_name)?;
        let role = match role {
            Some(raw) => raw.parse::<UserRole>()?,
            None => UserRole::Participant,
        };
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            username,
            full_name,
            role,
        })
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password destined for hashing inside the identity adapter.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Requested role, defaulted when the caller omitted it.
    pub fn role(&self) -> UserRole {
        self.role
    }
}
