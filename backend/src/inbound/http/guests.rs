//! Guest list HTTP handlers.
//!
//! ```text
//! POST   /guest_list/{name}  {"table":4,"accompanying_guests":2}
//! GET    /guest_list
//! PUT    /guests/{name}      {"accompanying_guests":1}
//! DELETE /guests/{name}
//! GET    /guests
//! GET    /seats_empty
//! ```
//!
//! Rule violations are answered with the bare message string; see
//! [`RejectionStatus`](super::RejectionStatus) for the status code.
//!
//! The check-in body is decoded by hand so that an unknown guest is reported
//! as such even when the body is unusable.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{AddGuestRequest, ArrivingEntourage, CheckInRequest, CheckOutRequest};
use crate::domain::{Error, Guest, GuestName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::json_config;
use crate::inbound::http::rejection::outcome_response;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for registering a guest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddGuestRequestBody {
    /// Seats at the guest's table, the guest included.
    pub table: u32,
    /// People expected to come with the guest.
    #[serde(default)]
    pub accompanying_guests: u32,
}

/// Request payload for checking a guest in.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CheckInRequestBody {
    /// People who actually came with the guest.
    #[serde(default)]
    pub accompanying_guests: u32,
}

/// Name echoed back after a successful registration or check-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GuestNameResponseBody {
    /// Guest name as given in the path.
    pub name: String,
}

/// One registered guest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GuestListEntryBody {
    /// Guest name.
    pub name: String,
    /// Seats at the guest's table.
    pub table: u32,
    /// Registered or, once arrived, actual entourage.
    pub accompanying_guests: u32,
}

impl From<&Guest> for GuestListEntryBody {
    fn from(guest: &Guest) -> Self {
        Self {
            name: guest.name().to_string(),
            table: guest.table_capacity(),
            accompanying_guests: guest.accompanying_guests(),
        }
    }
}

/// Every registered guest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GuestListResponseBody {
    /// Guests in registration order.
    pub guests: Vec<GuestListEntryBody>,
}

/// One guest who has checked in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ArrivedGuestBody {
    /// Guest name.
    pub name: String,
    /// People who came with the guest.
    pub accompanying_guests: u32,
    /// Arrival as unpadded `hour:minute`, e.g. `9:5`.
    #[schema(example = "13:37")]
    pub time_arrived: String,
}

/// Guests currently at the party.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ArrivedGuestsResponseBody {
    /// Arrived guests in registration order.
    pub guests: Vec<ArrivedGuestBody>,
}

/// Free seats across all tables.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmptySeatsResponseBody {
    /// Sum of unoccupied seats; negative only for overfull stored rows.
    pub seats_empty: i64,
}

fn parse_guest_name(raw: String) -> Result<GuestName, Error> {
    GuestName::new(raw).map_err(Error::from)
}

fn read_entourage(body: &[u8]) -> ArrivingEntourage {
    match serde_json::from_slice::<CheckInRequestBody>(body) {
        Ok(parsed) => ArrivingEntourage::Counted(parsed.accompanying_guests),
        Err(err) => {
            warn!(error = %err, "could not decode check-in body");
            ArrivingEntourage::Unreadable {
                reason: err.to_string(),
            }
        }
    }
}

/// Register a guest and the size of their party.
#[utoipa::path(
    post,
    path = "/guest_list/{name}",
    params(("name" = String, Path, description = "Guest name")),
    request_body = AddGuestRequestBody,
    responses(
        (status = 200, description = "Guest added, or the rule violation message", body = GuestNameResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Guest already registered (mapped status policy)", body = String),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "addGuest"
)]
#[post("/guest_list/{name}")]
pub async fn add_guest(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddGuestRequestBody>,
) -> ApiResult<HttpResponse> {
    let name = parse_guest_name(path.into_inner())?;
    let AddGuestRequestBody {
        table,
        accompanying_guests,
    } = payload.into_inner();
    let outcome = state
        .guest_list
        .add_guest(AddGuestRequest {
            name,
            table_capacity: table,
            accompanying_guests,
        })
        .await?;
    Ok(outcome_response(
        outcome.map(|added| GuestNameResponseBody {
            name: added.name.into(),
        }),
        state.rejection_status,
    ))
}

/// List every registered guest with their table and party size.
#[utoipa::path(
    get,
    path = "/guest_list",
    responses(
        (status = 200, description = "Registered guests", body = GuestListResponseBody),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "listGuests"
)]
#[get("/guest_list")]
pub async fn list_guests(state: web::Data<HttpState>) -> ApiResult<web::Json<GuestListResponseBody>> {
    let guests = state.guest_list_query.list_guests().await?;
    Ok(web::Json(GuestListResponseBody {
        guests: guests.iter().map(GuestListEntryBody::from).collect(),
    }))
}

/// Check a guest in with the entourage that actually came.
///
/// Omitting `accompanying_guests` counts as the guest arriving alone. An
/// unknown guest is reported as not on the list whatever the body holds;
/// for a registered guest an unreadable body is an invalid request.
#[utoipa::path(
    put,
    path = "/guests/{name}",
    params(("name" = String, Path, description = "Guest name")),
    request_body = CheckInRequestBody,
    responses(
        (status = 200, description = "Guest checked in, or the rule violation message", body = GuestNameResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Guest not registered (mapped status policy)", body = String),
        (status = 409, description = "Guest already checked in (mapped status policy)", body = String),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "checkInGuest"
)]
#[put("/guests/{name}")]
pub async fn check_in_guest(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let name = parse_guest_name(path.into_inner())?;
    let outcome = state
        .guest_list
        .check_in(CheckInRequest {
            name,
            entourage: read_entourage(&body),
        })
        .await?;
    Ok(outcome_response(
        outcome.map(|checked_in| GuestNameResponseBody {
            name: checked_in.name.into(),
        }),
        state.rejection_status,
    ))
}

/// Check a guest out, removing them from the list.
#[utoipa::path(
    delete,
    path = "/guests/{name}",
    params(("name" = String, Path, description = "Guest name")),
    responses(
        (status = 200, description = "Farewell message, or the rule violation message", body = String),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Guest not registered (mapped status policy)", body = String),
        (status = 409, description = "Guest has not arrived (mapped status policy)", body = String),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "checkOutGuest"
)]
#[delete("/guests/{name}")]
pub async fn check_out_guest(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = parse_guest_name(path.into_inner())?;
    let outcome = state.guest_list.check_out(CheckOutRequest { name }).await?;
    Ok(outcome_response(
        outcome.map(|left| format!("Guest {} left the party", left.name)),
        state.rejection_status,
    ))
}

/// List guests who have arrived and not yet left.
#[utoipa::path(
    get,
    path = "/guests",
    responses(
        (status = 200, description = "Arrived guests", body = ArrivedGuestsResponseBody),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "listArrivedGuests"
)]
#[get("/guests")]
pub async fn list_arrived_guests(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ArrivedGuestsResponseBody>> {
    let arrived = state.guest_list_query.list_arrived_guests().await?;
    let guests = arrived
        .iter()
        .filter_map(|guest| {
            guest.arrival_time().map(|time| ArrivedGuestBody {
                name: guest.name().to_string(),
                accompanying_guests: guest.accompanying_guests(),
                time_arrived: time.to_string(),
            })
        })
        .collect();
    Ok(web::Json(ArrivedGuestsResponseBody { guests }))
}

/// Count the seats nobody is sitting in or expected to sit in.
#[utoipa::path(
    get,
    path = "/seats_empty",
    responses(
        (status = 200, description = "Empty seat count", body = EmptySeatsResponseBody),
        (status = 503, description = "Guest store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "countEmptySeats"
)]
#[get("/seats_empty")]
pub async fn count_empty_seats(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<EmptySeatsResponseBody>> {
    let seats_empty = state.guest_list_query.count_empty_seats().await?;
    Ok(web::Json(EmptySeatsResponseBody { seats_empty }))
}

/// Register the guest list routes and their JSON extractor settings.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use guest_list::inbound::http::guests;
///
/// let _app = App::new().configure(guests::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(add_guest)
        .service(list_guests)
        .service(check_in_guest)
        .service(check_out_guest)
        .service(list_arrived_guests)
        .service(count_empty_seats);
}

#[cfg(test)]
#[path = "guests_tests.rs"]
mod tests;
