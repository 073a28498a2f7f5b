//! PostgreSQL-backed `GuestRepository` implementation using Diesel ORM.
//!
//! Check-in and check-out are single conditional statements; the row count
//! tells the domain whether the guard held.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConditionalWrite, GuestRepository, GuestRepositoryError};
use crate::domain::{ArrivalTime, Guest, GuestName};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{GuestArrivalUpdate, GuestRow, NewGuestRow};
use super::pool::DbPool;
use super::schema::guests;

/// Stored value of `arrival_time` for guests who have not arrived.
const NOT_ARRIVED: &str = "";

/// Diesel-backed implementation of the guest repository port.
#[derive(Clone)]
pub struct DieselGuestRepository {
    pool: DbPool,
}

impl DieselGuestRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_column(count: u32, field: &str) -> Result<i32, GuestRepositoryError> {
    i32::try_from(count)
        .map_err(|_| GuestRepositoryError::query(format!("{field} {count} exceeds column range")))
}

fn from_column(value: i32, field: &str, name: &str) -> Result<u32, GuestRepositoryError> {
    u32::try_from(value).map_err(|_| {
        GuestRepositoryError::query(format!("guest {name} has negative {field} {value}"))
    })
}

/// Convert a database row into a domain guest.
fn row_to_guest(row: GuestRow) -> Result<Guest, GuestRepositoryError> {
    let GuestRow {
        name: stored_name,
        table_capacity: stored_capacity,
        accompanying_guests: stored_accompanying,
        arrival_time,
    } = row;

    let table_capacity = from_column(stored_capacity, "table_capacity", &stored_name)?;
    let accompanying_guests =
        from_column(stored_accompanying, "accompanying_guests", &stored_name)?;
    let name = GuestName::new(stored_name)
        .map_err(|err| GuestRepositoryError::query(format!("stored guest name: {err}")))?;

    Ok(Guest::from_parts(
        name,
        table_capacity,
        accompanying_guests,
        ArrivalTime::from_stored(arrival_time),
    ))
}

fn write_outcome(affected: usize) -> ConditionalWrite {
    if affected == 0 {
        ConditionalWrite::Skipped
    } else {
        ConditionalWrite::Applied
    }
}

#[async_trait]
impl GuestRepository for DieselGuestRepository {
    async fn list(&self) -> Result<Vec<Guest>, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GuestRow> = guests::table
            .order((guests::created_at.asc(), guests::name.asc()))
            .select(GuestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_guest).collect()
    }

    async fn find_by_name(
        &self,
        name: &GuestName,
    ) -> Result<Option<Guest>, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = guests::table
            .filter(guests::name.eq(name.as_str()))
            .select(GuestRow::as_select())
            .first::<GuestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_guest).transpose()
    }

    async fn insert(&self, guest: &Guest) -> Result<(), GuestRepositoryError> {
        let new_row = NewGuestRow {
            name: guest.name().as_str(),
            table_capacity: to_column(guest.table_capacity(), "table_capacity")?,
            accompanying_guests: to_column(guest.accompanying_guests(), "accompanying_guests")?,
            arrival_time: guest.arrival_time().map_or(NOT_ARRIVED, ArrivalTime::as_str),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match diesel::insert_into(guests::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => {
                Err(GuestRepositoryError::duplicate(guest.name().as_str()))
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }

    async fn record_arrival(
        &self,
        name: &GuestName,
        accompanying_guests: u32,
        arrival_time: &ArrivalTime,
    ) -> Result<ConditionalWrite, GuestRepositoryError> {
        let update = GuestArrivalUpdate {
            accompanying_guests: to_column(accompanying_guests, "accompanying_guests")?,
            arrival_time: arrival_time.as_str(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            guests::table
                .filter(guests::name.eq(name.as_str()))
                .filter(guests::arrival_time.eq(NOT_ARRIVED)),
        )
        .set(&update)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(write_outcome(affected))
    }

    async fn remove_arrived(
        &self,
        name: &GuestName,
    ) -> Result<ConditionalWrite, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            guests::table
                .filter(guests::name.eq(name.as_str()))
                .filter(guests::arrival_time.ne(NOT_ARRIVED)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(write_outcome(affected))
    }
}
