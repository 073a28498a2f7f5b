//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the guest list endpoints, the health checks and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves
//! the generated document in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::guests::{
    AddGuestRequestBody, ArrivedGuestBody, ArrivedGuestsResponseBody, CheckInRequestBody,
    EmptySeatsResponseBody, GuestListEntryBody, GuestListResponseBody, GuestNameResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Guest list API",
        description = "Party guest registration, check-in and seating reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::guests::add_guest,
        crate::inbound::http::guests::list_guests,
        crate::inbound::http::guests::check_in_guest,
        crate::inbound::http::guests::check_out_guest,
        crate::inbound::http::guests::list_arrived_guests,
        crate::inbound::http::guests::count_empty_seats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AddGuestRequestBody,
        CheckInRequestBody,
        GuestNameResponseBody,
        GuestListEntryBody,
        GuestListResponseBody,
        ArrivedGuestBody,
        ArrivedGuestsResponseBody,
        EmptySeatsResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "guests", description = "Guest registration, arrivals and departures"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
