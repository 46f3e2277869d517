//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: keep the publish-and-pay workflow transport agnostic. Inbound
//! adapters parse raw payloads into the validated types here; outbound
//! adapters implement the driven ports; nothing in this tree knows about
//! actix, Diesel, or reqwest.

mod access;
pub mod auth;
pub mod error;
pub mod fees;
pub mod hackathon;
pub mod payment;
pub mod ports;
pub mod publish_service;
pub mod registration_service;
pub mod roster;
pub mod roster_service;
pub mod payment_service;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::auth::{
    LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError,
    MIN_PASSWORD_LENGTH,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fees::{platform_fee_minor_units, PLATFORM_FEE_RATE};
pub use self::hackathon::{
    Hackathon, HackathonStatus, HackathonTitle, HackathonValidationError, PrizePool,
};
pub use self::payment::{ClientSecret, Currency, PaymentIntentSpec, PaymentMetadata};
pub use self::publish_service::PublishService;
pub use self::registration_service::RegistrationService;
pub use self::roster::{HackathonSummary, TeamMembership, TeamRoster};
pub use self::roster_service::TeamRosterService;
pub use self::payment_service::PaymentIntentService;
pub use self::user::{
    EmailAddress, FullName, User, UserId, UserRole, UserValidationError, Username,
};
