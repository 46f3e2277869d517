//! Payment intent types exchanged with the card processor.
//!
//! The processor owns the intent's lifecycle; this backend only describes
//! what to create and hands the resulting client secret back to the browser.
//! Nothing here is persisted — the metadata attached to the intent is the
//! only reconciliation trail.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::hackathon::{HackathonTitle, PrizePool};
use super::user::{EmailAddress, UserId};

/// Settlement currency; the platform charges in USD only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
}

impl Currency {
    /// ISO-4217 lowercase token used on the processor wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for payment values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidationError {
    NegativeAmount,
    EmptyClientSecret,
}

impl fmt::Display for PaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "payment amount must not be negative"),
            Self::EmptyClientSecret => write!(f, "client secret must not be empty"),
        }
    }
}

impl std::error::Error for PaymentValidationError {}

/// Reconciliation metadata attached to every intent.
///
/// This is the only audit trail linking a processor charge back to the
/// hackathon and organiser; there is no local ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMetadata {
    /// Hackathon being paid for.
    pub hackathon_title: HackathonTitle,
    /// Prize pool the fee was computed from, in major units.
    pub prize_pool: PrizePool,
    /// Computed platform fee in minor units.
    pub platform_fee_minor_units: i64,
    /// Paying organiser.
    pub organizer_id: UserId,
    /// Organiser contact for reconciliation.
    pub organizer_email: EmailAddress,
}

/// Fully validated description of an intent to create at the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentSpec {
    amount_minor_units: i64,
    currency: Currency,
    metadata: PaymentMetadata,
}

impl PaymentIntentSpec {
    /// Build a spec from an already amount-checked fee.
    pub fn new(
        amount_minor_units: i64,
        metadata: PaymentMetadata,
    ) -> Result<Self, PaymentValidationError> {
        if amount_minor_units < 0 {
            return Err(PaymentValidationError::NegativeAmount);
        }
        Ok(Self {
            amount_minor_units,
            currency: Currency::Usd,
            metadata,
        })
    }

    /// Charge amount in minor units.
    pub fn amount_minor_units(&self) -> i64 {
        self.amount_minor_units
    }

    /// Settlement currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Reconciliation metadata.
    pub fn metadata(&self) -> &PaymentMetadata {
        &self.metadata
    }
}

/// Opaque token the browser uses to complete authorisation with the
/// processor.
///
/// Debug output is redacted so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wrap a non-empty secret returned by the processor.
    pub fn new(raw: impl Into<String>) -> Result<Self, PaymentValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PaymentValidationError::EmptyClientSecret);
        }
        Ok(Self(raw))
    }

    /// Expose the secret for the HTTP response body.
    pub fn reveal(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn metadata() -> PaymentMetadata {
        PaymentMetadata {
            hackathon_title: HackathonTitle::new("AI for Good").expect("title"),
            prize_pool: PrizePool::new(5000.0).expect("pool"),
            platform_fee_minor_units: 50_000,
            organizer_id: UserId::random(),
            organizer_email: EmailAddress::new("org@example.com").expect("email"),
        }
    }

    #[rstest]
    fn negative_amounts_are_rejected() {
        let err = PaymentIntentSpec::new(-1, metadata()).expect_err("negative amount must fail");
        assert_eq!(err, PaymentValidationError::NegativeAmount);
    }

    #[rstest]
    fn specs_default_to_usd() {
        let spec = PaymentIntentSpec::new(50_000, metadata()).expect("valid spec");
        assert_eq!(spec.currency(), Currency::Usd);
        assert_eq!(spec.currency().as_str(), "usd");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_client_secrets_are_rejected(#[case] raw: &str) {
        let err = ClientSecret::new(raw).expect_err("blank secret must fail");
        assert_eq!(err, PaymentValidationError::EmptyClientSecret);
    }

    #[rstest]
    fn client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("pi_123_secret_456").expect("valid secret");
        assert_eq!(format!("{secret:?}"), "ClientSecret(..)");
        assert_eq!(secret.reveal(), "pi_123_secret_456");
    }
}
