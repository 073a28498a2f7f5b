//! Domain primitives, aggregates and services.
//!
//! Purpose: hold the guest list rules independently of HTTP and SQL. Adapters
//! talk to the domain only through the traits in [`ports`].
//!
//! Public surface:
//! - `Guest`, `GuestName`, `ArrivalTime`: the guest entity and its parts.
//! - `GuestListRejection`, `GuestListOutcome`: business-rule results.
//! - `Error`, `ErrorCode`: infrastructure and validation failures.
//! - `GuestListService`: implementation of the driving ports.

mod arrival_time;
pub mod error;
mod guest;
mod guest_list_outcome;
mod guest_list_service;
pub mod ports;
pub mod trace_id;

pub use self::arrival_time::ArrivalTime;
pub use self::error::{Error, ErrorCode};
pub use self::guest::{
    GUEST_NAME_MAX, Guest, GuestName, GuestValidationError, PARTY_SIZE_MAX, ensure_party_size,
};
pub use self::guest_list_outcome::{GuestListOutcome, GuestListRejection};
pub use self::guest_list_service::GuestListService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
