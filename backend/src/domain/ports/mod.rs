//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod guest_list_command;
mod guest_list_query;
mod guest_repository;

#[cfg(test)]
pub use guest_list_command::MockGuestListCommand;
pub use guest_list_command::{
    AddGuestRequest, AddGuestResponse, ArrivingEntourage, CheckInRequest, CheckInResponse,
    CheckOutRequest, CheckOutResponse, GuestListCommand,
};
#[cfg(test)]
pub use guest_list_query::MockGuestListQuery;
pub use guest_list_query::GuestListQuery;
#[cfg(test)]
pub use guest_repository::MockGuestRepository;
pub use guest_repository::{ConditionalWrite, GuestRepository, GuestRepositoryError};
