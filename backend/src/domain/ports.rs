//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with adapters
//! (the record store, the identity provider, the card processor); driving
//! ports are the use-cases HTTP handlers depend on. Each driven port exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::auth::{LoginCredentials, SignupDetails};
use super::hackathon::{Hackathon, HackathonStatus};
use super::payment::{ClientSecret, PaymentIntentSpec};
use super::roster::{TeamMembership, TeamRoster};
use super::user::{User, UserId};
use super::Error;

/// Persistence errors raised by [`HackathonRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HackathonRepositoryError {
    /// Store connectivity failures.
    #[error("hackathon store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("hackathon store query failed: {message}")]
    Query { message: String },
}

impl HackathonRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Result of the conditional publish operation.
///
/// The store performs the status check and the update as one atomic
/// conditional write, so concurrent publishers of the same record cannot
/// both observe `Draft` and both succeed: exactly one receives
/// `Published`, the rest receive `NotDraft`.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The record moved from draft to published; carries the updated row.
    Published(Hackathon),
    /// No record exists for the id.
    NotFound,
    /// The record exists but is not in draft; carries the observed status.
    NotDraft(HackathonStatus),
}

/// Persistence port for hackathon records.
#[async_trait]
pub trait HackathonRepository: Send + Sync {
    /// Fetch a hackathon by identifier.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Hackathon>, HackathonRepositoryError>;

    /// Atomically publish a draft: update the record to `published` and
    /// stamp `updated_at`, only if its current status is `draft`.
    async fn publish_draft(
        &self,
        id: &Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<PublishOutcome, HackathonRepositoryError>;
}

/// Errors raised by [`IdentityGate`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityGateError {
    /// Provider connectivity failures.
    #[error("identity provider connection failed: {message}")]
    Connection { message: String },
    /// Lookup or mutation failed during execution.
    #[error("identity provider query failed: {message}")]
    Query { message: String },
    /// The provider rejected the registration (e.g. duplicate email).
    /// The message is safe to surface to the caller.
    #[error("registration rejected: {message}")]
    Rejected { message: String },
}

impl IdentityGateError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for provider rejections whose message clients may see.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Identity provider port: registration, credential checks, and principal
/// resolution.
///
/// Consulted before any privileged mutation; an absent user or role
/// mismatch rejects the request before any data is read or written.
#[async_trait]
pub trait IdentityGate: Send + Sync {
    /// Register a new user from validated signup details.
    async fn register(&self, details: &SignupDetails) -> Result<User, IdentityGateError>;

    /// Resolve the user behind a session principal.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityGateError>;

    /// Verify email/password credentials; `None` means no match, with no
    /// distinction between unknown email and wrong password.
    async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, IdentityGateError>;
}

/// Persistence errors raised by [`TeamRosterRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamRosterRepositoryError {
    /// Store connectivity failures.
    #[error("team roster store connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("team roster query failed: {message}")]
    Query { message: String },
}

impl TeamRosterRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only port for the roster aggregation.
#[async_trait]
pub trait TeamRosterRepository: Send + Sync {
    /// List the teams a user belongs to, newest join first, each annotated
    /// with member count and (optionally) its hackathon.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TeamMembership>, TeamRosterRepositoryError>;
}

/// Errors raised by [`PaymentGateway`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentGatewayError {
    /// Network-level failure reaching the processor.
    #[error("payment processor transport failure: {message}")]
    Transport { message: String },
    /// The processor timed out.
    #[error("payment processor timed out: {message}")]
    Timeout { message: String },
    /// The processor rejected the create-intent request.
    #[error("payment processor rejected the request: {message}")]
    Rejected { message: String },
    /// The processor responded with an undecodable payload.
    #[error("payment processor response could not be decoded: {message}")]
    Decode { message: String },
}

impl PaymentGatewayError {
    /// Helper for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for processor rejections.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Card processor port.
///
/// One fire-and-await call per publish attempt: no polling, no webhook
/// confirmation, no retries. The processor tracks the intent's completion
/// state; this backend never learns whether payment eventually succeeds.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment authorisation object and return its client secret.
    async fn create_intent(
        &self,
        spec: &PaymentIntentSpec,
    ) -> Result<ClientSecret, PaymentGatewayError>;
}

/// Driving port: the guarded DRAFT → PUBLISHED transition.
#[async_trait]
pub trait HackathonPublisher: Send + Sync {
    /// Publish a draft hackathon on behalf of `actor`.
    async fn publish(&self, actor: &UserId, hackathon_id: &Uuid) -> Result<Hackathon, Error>;
}

/// Validated create-intent command assembled by the HTTP adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntentCommand {
    /// Client-claimed fee amount in minor units, checked against the
    /// computed fee with strict equality.
    pub amount_minor_units: i64,
    /// Title of the hackathon being paid for.
    pub hackathon_title: super::hackathon::HackathonTitle,
    /// Prize pool the fee derives from.
    pub prize_pool: super::hackathon::PrizePool,
}

/// Driving port: fee-validated payment intent creation.
#[async_trait]
pub trait PaymentIntents: Send + Sync {
    /// Create an intent for the platform fee on behalf of `actor`.
    async fn create_intent(
        &self,
        actor: &UserId,
        command: CreateIntentCommand,
    ) -> Result<ClientSecret, Error>;
}

/// Driving port: signup and login.
#[async_trait]
pub trait Registration: Send + Sync {
    /// Register a new user.
    async fn sign_up(&self, details: SignupDetails) -> Result<User, Error>;

    /// Authenticate credentials, returning the matched user.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<User, Error>;
}

/// Driving port: the current user's team roster.
#[async_trait]
pub trait TeamRosterQuery: Send + Sync {
    /// Roster for the given user; zero memberships yield an empty roster,
    /// never an error.
    async fn roster_for_user(&self, user_id: &UserId) -> Result<TeamRoster, Error>;
}
