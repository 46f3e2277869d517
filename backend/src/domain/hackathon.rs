//! Hackathon aggregate and its lifecycle states.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

const TITLE_MAX: usize = 200;

/// Validation errors returned by the hackathon constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum HackathonValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    NonFinitePrizePool,
    NegativePrizePool,
    UnknownStatus { raw: String },
}

impl fmt::Display for HackathonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::NonFinitePrizePool => write!(f, "prize pool must be a finite amount"),
            Self::NegativePrizePool => write!(f, "prize pool must not be negative"),
            Self::UnknownStatus { raw } => write!(f, "unknown hackathon status: {raw}"),
        }
    }
}

impl std::error::Error for HackathonValidationError {}

/// Validated hackathon title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct HackathonTitle(String);

impl HackathonTitle {
    /// Validate a raw title.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HackathonValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HackathonValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(HackathonValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the title text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HackathonTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prize pool in major currency units (USD).
///
/// ## Invariants
/// - finite and non-negative; a zero pool is legal and yields a zero fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PrizePool(f64);

impl PrizePool {
    /// Validate a raw amount.
    ///
    /// # Examples
    /// ```
    /// use hackhub_backend::domain::PrizePool;
    ///
    /// let pool = PrizePool::new(5000.0).expect("valid pool");
    /// assert_eq!(pool.amount(), 5000.0);
    /// assert!(PrizePool::new(-1.0).is_err());
    /// ```
    pub fn new(amount: f64) -> Result<Self, HackathonValidationError> {
        if !amount.is_finite() {
            return Err(HackathonValidationError::NonFinitePrizePool);
        }
        if amount < 0.0 {
            return Err(HackathonValidationError::NegativePrizePool);
        }
        Ok(Self(amount))
    }

    /// Amount in major currency units.
    pub fn amount(&self) -> f64 {
        self.0
    }
}

/// Lifecycle states of a hackathon record.
///
/// The only transition this backend performs is `Draft` → `Published`;
/// the remaining states exist in the store and merely fail the draft guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HackathonStatus {
    Draft,
    Published,
    Completed,
    Cancelled,
}

impl HackathonStatus {
    /// Lowercase storage token for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for HackathonStatus {
    type Err = HackathonValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(HackathonValidationError::UnknownStatus {
                raw: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hackathon aggregate as read from and written to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    id: Uuid,
    title: HackathonTitle,
    prize_pool: PrizePool,
    status: HackathonStatus,
    organizer_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Hackathon {
    /// Assemble a hackathon from already-validated parts.
    pub fn new(
        id: Uuid,
        title: HackathonTitle,
        prize_pool: PrizePool,
        status: HackathonStatus,
        organizer_id: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            prize_pool,
            status,
            organizer_id,
            created_at,
            updated_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Title text.
    pub fn title(&self) -> &HackathonTitle {
        &self.title
    }

    /// Prize pool in major units.
    pub fn prize_pool(&self) -> PrizePool {
        self.prize_pool
    }

    /// Current lifecycle status.
    pub fn status(&self) -> HackathonStatus {
        self.status
    }

    /// Owning organiser.
    pub fn organizer_id(&self) -> &UserId {
        &self.organizer_id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-modification timestamp, stamped by the publish workflow.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the record is still publishable.
    pub fn is_draft(&self) -> bool {
        matches!(self.status, HackathonStatus::Draft)
    }
}
