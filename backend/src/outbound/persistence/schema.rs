//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Guests on the party list.
    guests (name) {
        /// Primary key: the name on the invitation (max 255 characters).
        name -> Varchar,
        /// Seats reserved at the guest's table.
        table_capacity -> Int4,
        /// Companions registered, replaced by the actual count at check-in.
        accompanying_guests -> Int4,
        /// `hour:minute` of arrival; empty until the guest checks in.
        arrival_time -> Varchar,
        /// Insertion timestamp, used only to keep list order stable.
        created_at -> Timestamptz,
    }
}
