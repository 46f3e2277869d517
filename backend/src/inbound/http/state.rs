//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{HackathonPublisher, PaymentIntents, Registration, TeamRosterQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login use-cases.
    pub registration: Arc<dyn Registration>,
    /// The guarded publish transition.
    pub publisher: Arc<dyn HackathonPublisher>,
    /// Fee-validated payment intent creation.
    pub payments: Arc<dyn PaymentIntents>,
    /// The current user's roster query.
    pub roster: Arc<dyn TeamRosterQuery>,
}

impl HttpState {
    /// Bundle the driving ports for handler registration.
    pub fn new(
        registration: Arc<dyn Registration>,
        publisher: Arc<dyn HackathonPublisher>,
        payments: Arc<dyn PaymentIntents>,
        roster: Arc<dyn TeamRosterQuery>,
    ) -> Self {
        Self {
            registration,
            publisher,
            payments,
            roster,
        }
    }
}
