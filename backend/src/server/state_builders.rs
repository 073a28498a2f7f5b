//! Builders for HTTP state backed by the PostgreSQL adapter.

use std::sync::Arc;

use mockable::DefaultClock;

use guest_list::domain::GuestListService;
use guest_list::inbound::http::state::HttpState;
use guest_list::outbound::persistence::DieselGuestRepository;

use super::ServerConfig;

/// Wire the guest list service onto the configured pool, stamping arrivals
/// with the system clock.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let service = GuestListService::new(
        Arc::new(DieselGuestRepository::new(config.db_pool.clone())),
        Arc::new(DefaultClock),
    );
    HttpState::from_service(Arc::new(service)).with_rejection_status(config.rejection_status)
}
