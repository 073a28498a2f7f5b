//! Driven port for guest persistence.
//!
//! Arrival and departure writes are conditional so two concurrent requests
//! for the same guest cannot both succeed.

use async_trait::async_trait;

use crate::domain::{ArrivalTime, Guest, GuestName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by guest repository adapters.
    pub enum GuestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "guest repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "guest repository query failed: {message}",
        /// A guest with the same name is already stored.
        Duplicate { name: String } =>
            "guest {name} already exists",
    }
}

/// Whether a conditional write found a row in the expected state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalWrite {
    /// Exactly the guarded row was written.
    Applied,
    /// No row matched the name and state guard.
    Skipped,
}

/// Port for reading and writing guests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Every stored guest, in registration order.
    async fn list(&self) -> Result<Vec<Guest>, GuestRepositoryError>;

    /// The guest registered under `name`, if any.
    async fn find_by_name(&self, name: &GuestName)
    -> Result<Option<Guest>, GuestRepositoryError>;

    /// Store a new guest. Fails with `Duplicate` when the name is taken.
    async fn insert(&self, guest: &Guest) -> Result<(), GuestRepositoryError>;

    /// Set the arrival stamp and entourage, provided the guest exists and has
    /// not arrived yet.
    async fn record_arrival(
        &self,
        name: &GuestName,
        accompanying_guests: u32,
        arrival_time: &ArrivalTime,
    ) -> Result<ConditionalWrite, GuestRepositoryError>;

    /// Delete the guest, provided they exist and have arrived.
    async fn remove_arrived(
        &self,
        name: &GuestName,
    ) -> Result<ConditionalWrite, GuestRepositoryError>;
}
