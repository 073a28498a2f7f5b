//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::guests;

/// Row struct for reading from the guests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuestRow {
    pub name: String,
    pub table_capacity: i32,
    pub accompanying_guests: i32,
    pub arrival_time: String,
}

/// Insertable struct for registering a guest.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guests)]
pub(crate) struct NewGuestRow<'a> {
    pub name: &'a str,
    pub table_capacity: i32,
    pub accompanying_guests: i32,
    pub arrival_time: &'a str,
}

/// Changeset applied when a guest checks in.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = guests)]
pub(crate) struct GuestArrivalUpdate<'a> {
    pub accompanying_guests: i32,
    pub arrival_time: &'a str,
}
