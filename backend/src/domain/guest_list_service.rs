//! Guest list domain service.
//!
//! Implements both driving ports on top of a [`GuestRepository`]. Check-in
//! and check-out validate against a fresh read, then issue a conditional
//! write; if the write finds the row in a different state, the record is read
//! again and the rule that now applies is reported.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AddGuestRequest, AddGuestResponse, ArrivingEntourage, CheckInRequest, CheckInResponse,
    CheckOutRequest, CheckOutResponse, ConditionalWrite, GuestListCommand, GuestListQuery,
    GuestRepository, GuestRepositoryError,
};
use crate::domain::{
    ArrivalTime, Error, Guest, GuestListOutcome, GuestListRejection, GuestName, ensure_party_size,
};

fn map_repository_error(error: GuestRepositoryError) -> Error {
    match error {
        GuestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("guest repository unavailable: {message}"))
        }
        GuestRepositoryError::Query { message } => {
            Error::internal(format!("guest repository error: {message}"))
        }
        GuestRepositoryError::Duplicate { name } => {
            Error::conflict(format!("guest {name} already exists"))
        }
    }
}

fn unreadable_body(reason: String) -> Error {
    Error::invalid_request("request body is not valid JSON for this operation")
        .with_details(json!({ "reason": reason }))
}

fn not_in_guest_list<T>(name: &GuestName) -> GuestListOutcome<T> {
    GuestListOutcome::Rejected(GuestListRejection::NotInGuestList { name: name.clone() })
}

/// Guest list service implementing [`GuestListCommand`] and [`GuestListQuery`].
#[derive(Clone)]
pub struct GuestListService<R> {
    guest_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> GuestListService<R> {
    /// Create a service over `guest_repo`, stamping arrivals with `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use guest_list::domain::GuestListService;
    /// # use guest_list::outbound::persistence::{DbPool, DieselGuestRepository};
    /// # use mockable::DefaultClock;
    /// # fn example(pool: DbPool) {
    /// let service = GuestListService::new(
    ///     Arc::new(DieselGuestRepository::new(pool)),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// # }
    /// ```
    #[must_use]
    pub fn new(guest_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { guest_repo, clock }
    }
}

impl<R> GuestListService<R>
where
    R: GuestRepository,
{
    async fn find(&self, name: &GuestName) -> Result<Option<Guest>, Error> {
        self.guest_repo
            .find_by_name(name)
            .await
            .map_err(map_repository_error)
    }

    /// Explain a check-in whose conditional update matched no row.
    async fn explain_skipped_check_in(
        &self,
        name: &GuestName,
    ) -> Result<GuestListOutcome<CheckInResponse>, Error> {
        match self.find(name).await? {
            None => Ok(not_in_guest_list(name)),
            Some(guest) if guest.has_arrived() => Ok(GuestListOutcome::Rejected(
                GuestListRejection::AlreadyCheckedIn { name: name.clone() },
            )),
            Some(_) => {
                warn!(guest = %name, "arrival update skipped for a guest who has not arrived");
                Err(Error::internal(format!("check-in for {name} was not applied")))
            }
        }
    }

    /// Explain a check-out whose conditional delete matched no row.
    async fn explain_skipped_check_out(
        &self,
        name: &GuestName,
    ) -> Result<GuestListOutcome<CheckOutResponse>, Error> {
        match self.find(name).await? {
            None => Ok(not_in_guest_list(name)),
            Some(guest) => match guest.ensure_can_check_out() {
                Err(rejection) => Ok(GuestListOutcome::Rejected(rejection)),
                Ok(()) => {
                    warn!(guest = %name, "departure delete skipped for an arrived guest");
                    Err(Error::internal(format!("check-out for {name} was not applied")))
                }
            },
        }
    }
}

#[async_trait]
impl<R> GuestListCommand for GuestListService<R>
where
    R: GuestRepository,
{
    async fn add_guest(
        &self,
        request: AddGuestRequest,
    ) -> Result<GuestListOutcome<AddGuestResponse>, Error> {
        let AddGuestRequest {
            name,
            table_capacity,
            accompanying_guests,
        } = request;
        ensure_party_size("table", table_capacity)?;
        ensure_party_size("accompanying_guests", accompanying_guests)?;

        let guest = match Guest::register(name, table_capacity, accompanying_guests) {
            Ok(guest) => guest,
            Err(rejection) => return Ok(GuestListOutcome::Rejected(rejection)),
        };

        match self.guest_repo.insert(&guest).await {
            Ok(()) => {
                info!(
                    guest = %guest.name(),
                    table_capacity,
                    accompanying_guests,
                    "guest added to the list"
                );
                Ok(GuestListOutcome::Accepted(AddGuestResponse {
                    name: guest.name().clone(),
                }))
            }
            Err(GuestRepositoryError::Duplicate { .. }) => Ok(GuestListOutcome::Rejected(
                GuestListRejection::AlreadyInGuestList {
                    name: guest.name().clone(),
                },
            )),
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn check_in(
        &self,
        request: CheckInRequest,
    ) -> Result<GuestListOutcome<CheckInResponse>, Error> {
        let CheckInRequest { name, entourage } = request;

        let Some(guest) = self.find(&name).await? else {
            return Ok(not_in_guest_list(&name));
        };
        let accompanying_guests = match entourage {
            ArrivingEntourage::Counted(count) => count,
            ArrivingEntourage::Unreadable { reason } => return Err(unreadable_body(reason)),
        };

        let arrival_time = ArrivalTime::now(self.clock.as_ref());
        if let Err(rejection) = guest.check_in(accompanying_guests, arrival_time.clone()) {
            return Ok(GuestListOutcome::Rejected(rejection));
        }

        let write = self
            .guest_repo
            .record_arrival(&name, accompanying_guests, &arrival_time)
            .await
            .map_err(map_repository_error)?;

        match write {
            ConditionalWrite::Applied => {
                info!(guest = %name, accompanying_guests, %arrival_time, "guest checked in");
                Ok(GuestListOutcome::Accepted(CheckInResponse { name }))
            }
            ConditionalWrite::Skipped => self.explain_skipped_check_in(&name).await,
        }
    }

    async fn check_out(
        &self,
        request: CheckOutRequest,
    ) -> Result<GuestListOutcome<CheckOutResponse>, Error> {
        let CheckOutRequest { name } = request;

        let Some(guest) = self.find(&name).await? else {
            return Ok(not_in_guest_list(&name));
        };
        if let Err(rejection) = guest.ensure_can_check_out() {
            return Ok(GuestListOutcome::Rejected(rejection));
        }

        let write = self
            .guest_repo
            .remove_arrived(&name)
            .await
            .map_err(map_repository_error)?;

        match write {
            ConditionalWrite::Applied => {
                info!(guest = %name, "guest left the party");
                Ok(GuestListOutcome::Accepted(CheckOutResponse { name }))
            }
            ConditionalWrite::Skipped => self.explain_skipped_check_out(&name).await,
        }
    }
}

#[async_trait]
impl<R> GuestListQuery for GuestListService<R>
where
    R: GuestRepository,
{
    async fn list_guests(&self) -> Result<Vec<Guest>, Error> {
        self.guest_repo.list().await.map_err(map_repository_error)
    }

    async fn list_arrived_guests(&self) -> Result<Vec<Guest>, Error> {
        let guests = self.list_guests().await?;
        Ok(guests.into_iter().filter(Guest::has_arrived).collect())
    }

    async fn count_empty_seats(&self) -> Result<i64, Error> {
        let guests = self.list_guests().await?;
        Ok(guests.iter().map(Guest::empty_seats).sum())
    }
}

#[cfg(test)]
#[path = "guest_list_service_tests.rs"]
mod tests;
