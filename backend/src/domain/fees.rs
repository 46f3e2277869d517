//! Platform fee calculation.
//!
//! The fee is the only monetary computation in the system: 10% of the prize
//! pool, expressed in minor currency units (cents). Callers compare client
//! supplied amounts against this value with strict equality; there is no
//! tolerance band.

use super::hackathon::PrizePool;

/// Platform fee rate applied to a hackathon's prize pool.
pub const PLATFORM_FEE_RATE: f64 = 0.10;

/// Minor units per major currency unit (cents per dollar).
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Compute the platform fee for a prize pool, in minor currency units.
///
/// Defined as `round(prize_pool * 0.10 * 100)`; rounding is half-away-from
/// zero per [`f64::round`]. Deterministic and free of side effects. A zero
/// pool yields a zero fee; negative or non-finite input is unrepresentable
/// because [`PrizePool`] validates at construction.
///
/// # Examples
/// ```
/// use hackhub_backend::domain::{platform_fee_minor_units, PrizePool};
///
/// let pool = PrizePool::new(1000.0).unwrap();
/// assert_eq!(platform_fee_minor_units(pool), 10_000);
/// ```
pub fn platform_fee_minor_units(prize_pool: PrizePool) -> i64 {
    (prize_pool.amount() * PLATFORM_FEE_RATE * MINOR_UNITS_PER_MAJOR).round() as i64
}
