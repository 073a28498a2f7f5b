//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{ConditionalWrite, GuestRepository, GuestRepositoryError};
use crate::domain::{ArrivalTime, Guest, GuestName, PARTY_SIZE_MAX};

/// Guest repository held in process memory, preserving registration order.
///
/// Conditional writes check and mutate under one lock, giving the same
/// all-or-nothing behaviour as the SQL adapter. Counts outside the `INT4`
/// column range fail with a query error, as they do in PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryGuestRepository {
    guests: Mutex<Vec<Guest>>,
}

fn fits_column(count: u32, field: &str) -> Result<(), GuestRepositoryError> {
    if count > PARTY_SIZE_MAX {
        return Err(GuestRepositoryError::query(format!(
            "{field} {count} exceeds column range"
        )));
    }
    Ok(())
}

impl InMemoryGuestRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `guests` already stored, bypassing the registration rules.
    #[must_use]
    pub fn with_guests(guests: impl IntoIterator<Item = Guest>) -> Self {
        Self {
            guests: Mutex::new(guests.into_iter().collect()),
        }
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Guest> {
        self.lock().map(|guests| guests.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Guest>>, GuestRepositoryError> {
        self.guests
            .lock()
            .map_err(|_| GuestRepositoryError::connection("in-memory guest store poisoned"))
    }
}

#[async_trait]
impl GuestRepository for InMemoryGuestRepository {
    async fn list(&self) -> Result<Vec<Guest>, GuestRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_name(
        &self,
        name: &GuestName,
    ) -> Result<Option<Guest>, GuestRepositoryError> {
        Ok(self.lock()?.iter().find(|g| g.name() == name).cloned())
    }

    async fn insert(&self, guest: &Guest) -> Result<(), GuestRepositoryError> {
        fits_column(guest.table_capacity(), "table_capacity")?;
        fits_column(guest.accompanying_guests(), "accompanying_guests")?;
        let mut guests = self.lock()?;
        if guests.iter().any(|g| g.name() == guest.name()) {
            return Err(GuestRepositoryError::duplicate(guest.name().as_str()));
        }
        guests.push(guest.clone());
        Ok(())
    }

    async fn record_arrival(
        &self,
        name: &GuestName,
        accompanying_guests: u32,
        arrival_time: &ArrivalTime,
    ) -> Result<ConditionalWrite, GuestRepositoryError> {
        fits_column(accompanying_guests, "accompanying_guests")?;
        let mut guests = self.lock()?;
        let Some(slot) = guests
            .iter_mut()
            .find(|g| g.name() == name && !g.has_arrived())
        else {
            return Ok(ConditionalWrite::Skipped);
        };
        *slot = Guest::from_parts(
            name.clone(),
            slot.table_capacity(),
            accompanying_guests,
            Some(arrival_time.clone()),
        );
        Ok(ConditionalWrite::Applied)
    }

    async fn remove_arrived(
        &self,
        name: &GuestName,
    ) -> Result<ConditionalWrite, GuestRepositoryError> {
        let mut guests = self.lock()?;
        let before = guests.len();
        guests.retain(|g| !(g.name() == name && g.has_arrived()));
        if guests.len() == before {
            Ok(ConditionalWrite::Skipped)
        } else {
            Ok(ConditionalWrite::Applied)
        }
    }
}

/// Clock frozen at a fixed local instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    /// Freeze the clock at `hour:minute` local time on a fixed date.
    ///
    /// # Panics
    /// Panics when the components do not form a valid local time.
    #[must_use]
    pub fn at(hour: u32, minute: u32) -> Self {
        match Local.with_ymd_and_hms(2026, 10, 18, hour, minute, 0).single() {
            Some(now) => Self(now),
            None => panic!("invalid fixed clock time {hour}:{minute}"),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

fn seeded_name(raw: &str) -> GuestName {
    match GuestName::new(raw) {
        Ok(name) => name,
        Err(error) => panic!("seed guest name {raw:?} is invalid: {error}"),
    }
}

/// The two-guest party used across scenario tests: Francisco arrived at
/// 13:37 filling his table of five, Martins (table of four, two companions)
/// has not arrived.
///
/// # Panics
/// Panics if a seed name stops passing [`GuestName`] validation.
#[must_use]
pub fn seeded_guests() -> Vec<Guest> {
    vec![
        Guest::from_parts(
            seeded_name("Francisco"),
            5,
            5,
            ArrivalTime::from_stored("13:37"),
        ),
        Guest::from_parts(seeded_name("Martins"), 4, 2, None),
    ]
}

#[cfg(test)]
mod tests {
    //! The double must honour the same guards as the SQL adapter.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn conditional_writes_respect_arrival_state() {
        let repo = InMemoryGuestRepository::with_guests(seeded_guests());
        let martins = seeded_name("Martins");
        let francisco = seeded_name("Francisco");
        let stamp = ArrivalTime::from_stored("21:0").expect("stamp");

        assert_eq!(
            repo.remove_arrived(&martins).await,
            Ok(ConditionalWrite::Skipped)
        );
        assert_eq!(
            repo.record_arrival(&francisco, 1, &stamp).await,
            Ok(ConditionalWrite::Skipped)
        );
        assert_eq!(
            repo.record_arrival(&martins, 3, &stamp).await,
            Ok(ConditionalWrite::Applied)
        );
        assert_eq!(
            repo.remove_arrived(&martins).await,
            Ok(ConditionalWrite::Applied)
        );
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_taken_names() {
        let repo = InMemoryGuestRepository::with_guests(seeded_guests());
        let duplicate = Guest::register(seeded_name("Martins"), 1, 0).expect("table fits");

        assert_eq!(
            repo.insert(&duplicate).await,
            Err(GuestRepositoryError::duplicate("Martins"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn counts_beyond_the_column_range_fail_like_postgres() {
        let repo = InMemoryGuestRepository::new();
        let big = Guest::from_parts(seeded_name("Big"), 3_000_000_000, 0, None);

        assert!(matches!(
            repo.insert(&big).await,
            Err(GuestRepositoryError::Query { .. })
        ));
        assert!(repo.snapshot().is_empty());
    }
}
