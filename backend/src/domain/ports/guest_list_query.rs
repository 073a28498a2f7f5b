//! Driving port for guest list reads.

use async_trait::async_trait;

use crate::domain::{Error, Guest};

/// Domain use-case port for reporting on the guest list.
///
/// Every call reads the store afresh.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestListQuery: Send + Sync {
    /// All registered guests, arrived or not.
    async fn list_guests(&self) -> Result<Vec<Guest>, Error>;

    /// Guests who have checked in and not yet left.
    async fn list_arrived_guests(&self) -> Result<Vec<Guest>, Error>;

    /// Unoccupied seats summed over every table.
    async fn count_empty_seats(&self) -> Result<i64, Error>;
}
