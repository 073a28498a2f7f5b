//! Driving port for guest list mutations.
//!
//! Successful calls return [`GuestListOutcome::Accepted`]; rule violations
//! come back as [`GuestListOutcome::Rejected`]. The `Err` side is reserved for
//! infrastructure failures and unusable input.

use async_trait::async_trait;

use crate::domain::{Error, GuestListOutcome, GuestName};

/// Register a guest before the party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGuestRequest {
    /// Name on the invitation.
    pub name: GuestName,
    /// Seats at the guest's table, the guest included.
    pub table_capacity: u32,
    /// People expected to come with the guest.
    pub accompanying_guests: u32,
}

/// Guest registered by [`GuestListCommand::add_guest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGuestResponse {
    /// Name of the registered guest.
    pub name: GuestName,
}

/// Entourage size as read from a check-in request.
///
/// The body is only judged once the guest is known to be registered, so an
/// unknown guest is reported as such whatever the body holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivingEntourage {
    /// The request named this many accompanying guests.
    Counted(u32),
    /// The request body could not be decoded.
    Unreadable {
        /// Decoder message, returned to the caller as `details.reason`.
        reason: String,
    },
}

/// Record a guest's arrival with the entourage that actually came.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInRequest {
    /// Guest checking in.
    pub name: GuestName,
    /// People who came with the guest.
    pub entourage: ArrivingEntourage,
}

/// Guest checked in by [`GuestListCommand::check_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInResponse {
    /// Name of the arrived guest.
    pub name: GuestName,
}

/// Remove an arrived guest from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutRequest {
    /// Guest leaving the party.
    pub name: GuestName,
}

/// Guest removed by [`GuestListCommand::check_out`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutResponse {
    /// Name of the departed guest.
    pub name: GuestName,
}

/// Domain use-case port for changing the guest list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestListCommand: Send + Sync {
    /// Register a guest whose entourage fits at their table.
    async fn add_guest(
        &self,
        request: AddGuestRequest,
    ) -> Result<GuestListOutcome<AddGuestResponse>, Error>;

    /// Record a registered guest's arrival.
    async fn check_in(
        &self,
        request: CheckInRequest,
    ) -> Result<GuestListOutcome<CheckInResponse>, Error>;

    /// Remove an arrived guest.
    async fn check_out(
        &self,
        request: CheckOutRequest,
    ) -> Result<GuestListOutcome<CheckOutResponse>, Error>;
}
