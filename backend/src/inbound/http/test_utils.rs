//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::GuestListService;
use crate::inbound::http::RejectionStatus;
use crate::inbound::http::guests;
use crate::inbound::http::state::HttpState;
use crate::test_support::{FixedClock, InMemoryGuestRepository, seeded_guests};

/// Hour and minute shown by the clock behind [`seeded_app`].
pub const SEEDED_CLOCK: (u32, u32) = (21, 7);

/// Build the guest routes over the seeded party, backed by memory and a clock
/// frozen at [`SEEDED_CLOCK`].
pub fn seeded_app(
    policy: RejectionStatus,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (hour, minute) = SEEDED_CLOCK;
    let service = GuestListService::new(
        Arc::new(InMemoryGuestRepository::with_guests(seeded_guests())),
        Arc::new(FixedClock::at(hour, minute)),
    );
    let state = HttpState::from_service(Arc::new(service)).with_rejection_status(policy);
    App::new()
        .app_data(web::Data::new(state))
        .configure(guests::configure)
}
