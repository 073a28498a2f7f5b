//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{GuestListCommand, GuestListQuery};

use super::RejectionStatus;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Port for add, check-in and check-out.
    pub guest_list: Arc<dyn GuestListCommand>,
    /// Port for the read-only listings.
    pub guest_list_query: Arc<dyn GuestListQuery>,
    /// How rule violations map to status codes.
    pub rejection_status: RejectionStatus,
}

impl HttpState {
    /// Construct state from the two driving ports, using the compatible
    /// rejection status policy.
    #[must_use]
    pub fn new(
        guest_list: Arc<dyn GuestListCommand>,
        guest_list_query: Arc<dyn GuestListQuery>,
    ) -> Self {
        Self {
            guest_list,
            guest_list_query,
            rejection_status: RejectionStatus::default(),
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    ///
    /// use guest_list::domain::GuestListService;
    /// use guest_list::inbound::http::state::HttpState;
    /// use guest_list::test_support::{FixedClock, InMemoryGuestRepository};
    ///
    /// let service = GuestListService::new(
    ///     Arc::new(InMemoryGuestRepository::new()),
    ///     Arc::new(FixedClock::at(20, 0)),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _query = state.guest_list_query.clone();
    /// ```
    #[must_use]
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: GuestListCommand + GuestListQuery + 'static,
    {
        Self::new(service.clone(), service)
    }

    /// Replace the rejection status policy.
    #[must_use]
    pub fn with_rejection_status(mut self, rejection_status: RejectionStatus) -> Self {
        self.rejection_status = rejection_status;
        self
    }
}
