//! Guest entity and its name primitive.
//!
//! A guest moves through `registered -> arrived -> removed`. The capacity and
//! arrival rules live here so every adapter applies them the same way.

use std::fmt;

use serde_json::json;

use super::{ArrivalTime, Error, GuestListRejection};

/// Maximum length of a guest name, matching the storage column.
pub const GUEST_NAME_MAX: usize = 255;

/// Largest table or entourage size a guest record can hold (`INT4` range).
pub const PARTY_SIZE_MAX: u32 = i32::MAX.unsigned_abs();

/// Validation errors for guest input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestValidationError {
    /// The name is empty or whitespace only.
    EmptyName,
    /// The name starts or ends with whitespace.
    NameHasSurroundingWhitespace,
    /// The name is longer than `max` characters.
    NameTooLong {
        /// Character limit.
        max: usize,
    },
    /// A table or entourage size does not fit the guest record.
    PartyTooLarge {
        /// Request field carrying the size.
        field: &'static str,
        /// Largest accepted value.
        max: u32,
    },
}

impl GuestValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameHasSurroundingWhitespace | Self::NameTooLong { .. } => {
                "name"
            }
            Self::PartyTooLarge { field, .. } => *field,
        }
    }

    /// Stable snake_case code for the `details.code` field.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameHasSurroundingWhitespace => "surrounding_whitespace",
            Self::NameTooLong { .. } => "name_too_long",
            Self::PartyTooLarge { .. } => "party_too_large",
        }
    }
}

impl fmt::Display for GuestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "guest name must not be empty"),
            Self::NameHasSurroundingWhitespace => {
                write!(f, "guest name must not start or end with whitespace")
            }
            Self::NameTooLong { max } => {
                write!(f, "guest name must be at most {max} characters")
            }
            Self::PartyTooLarge { field, max } => write!(f, "{field} must be at most {max}"),
        }
    }
}

impl std::error::Error for GuestValidationError {}

impl From<GuestValidationError> for Error {
    fn from(err: GuestValidationError) -> Self {
        Self::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}

/// Check that a table or entourage size fits the guest record.
///
/// # Errors
///
/// Returns [`GuestValidationError::PartyTooLarge`] above [`PARTY_SIZE_MAX`].
///
/// # Examples
/// ```
/// use guest_list::domain::{PARTY_SIZE_MAX, ensure_party_size};
///
/// assert_eq!(ensure_party_size("table", 8), Ok(8));
/// assert!(ensure_party_size("table", PARTY_SIZE_MAX + 1).is_err());
/// ```
pub const fn ensure_party_size(
    field: &'static str,
    size: u32,
) -> Result<u32, GuestValidationError> {
    if size > PARTY_SIZE_MAX {
        Err(GuestValidationError::PartyTooLarge {
            field,
            max: PARTY_SIZE_MAX,
        })
    } else {
        Ok(size)
    }
}

/// Unique guest identifier as written on the invitation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuestName(String);

impl GuestName {
    /// Validate and construct a [`GuestName`].
    ///
    /// # Examples
    /// ```
    /// use guest_list::domain::GuestName;
    ///
    /// assert!(GuestName::new("Francisco").is_ok());
    /// assert!(GuestName::new("  ").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`GuestValidationError`] for blank, padded or overlong names.
    pub fn new(raw: impl Into<String>) -> Result<Self, GuestValidationError> {
        let text = raw.into();
        if text.trim().is_empty() {
            return Err(GuestValidationError::EmptyName);
        }
        if text.trim() != text {
            return Err(GuestValidationError::NameHasSurroundingWhitespace);
        }
        if text.chars().count() > GUEST_NAME_MAX {
            return Err(GuestValidationError::NameTooLong {
                max: GUEST_NAME_MAX,
            });
        }
        Ok(Self(text))
    }

    /// Borrow the name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GuestName {
    type Error = GuestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GuestName> for String {
    fn from(value: GuestName) -> Self {
        value.0
    }
}

/// A guest on the list.
///
/// ## Invariants
/// - A guest registered through [`Guest::register`] or checked in through
///   [`Guest::check_in`] never has more accompanying guests than table seats.
/// - `arrival_time` is set at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    name: GuestName,
    table_capacity: u32,
    accompanying_guests: u32,
    arrival_time: Option<ArrivalTime>,
}

impl Guest {
    /// Register a guest who has not arrived yet.
    ///
    /// # Examples
    /// ```
    /// use guest_list::domain::{Guest, GuestName};
    ///
    /// let name = GuestName::new("Martins").expect("valid name");
    /// let guest = Guest::register(name, 4, 2).expect("table fits");
    /// assert!(!guest.has_arrived());
    /// assert!(Guest::register(GuestName::new("Ana").expect("valid name"), 2, 3).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GuestListRejection::TableTooSmall`] when the entourage does
    /// not fit at the table.
    pub fn register(
        name: GuestName,
        table_capacity: u32,
        accompanying_guests: u32,
    ) -> Result<Self, GuestListRejection> {
        if accompanying_guests > table_capacity {
            return Err(GuestListRejection::TableTooSmall);
        }
        Ok(Self {
            name,
            table_capacity,
            accompanying_guests,
            arrival_time: None,
        })
    }

    /// Rebuild a guest from persisted values without re-checking the rules.
    #[must_use]
    pub const fn from_parts(
        name: GuestName,
        table_capacity: u32,
        accompanying_guests: u32,
        arrival_time: Option<ArrivalTime>,
    ) -> Self {
        Self {
            name,
            table_capacity,
            accompanying_guests,
            arrival_time,
        }
    }

    /// Name on the invitation.
    #[must_use]
    pub const fn name(&self) -> &GuestName {
        &self.name
    }

    /// Seats at the guest's table, the guest included.
    #[must_use]
    pub const fn table_capacity(&self) -> u32 {
        self.table_capacity
    }

    /// Expected entourage before arrival, actual entourage after.
    #[must_use]
    pub const fn accompanying_guests(&self) -> u32 {
        self.accompanying_guests
    }

    /// When the guest checked in, if they have.
    #[must_use]
    pub const fn arrival_time(&self) -> Option<&ArrivalTime> {
        self.arrival_time.as_ref()
    }

    /// Whether the guest has checked in.
    #[must_use]
    pub const fn has_arrived(&self) -> bool {
        self.arrival_time.is_some()
    }

    /// Record the guest's arrival with the entourage that actually came.
    ///
    /// The entourage check runs before the already-arrived check, so an
    /// oversized entourage is reported even for a guest who is already in.
    ///
    /// # Errors
    ///
    /// Returns [`GuestListRejection::EntourageTooLarge`] or
    /// [`GuestListRejection::AlreadyCheckedIn`].
    pub fn check_in(
        &self,
        accompanying_guests: u32,
        arrival_time: ArrivalTime,
    ) -> Result<Self, GuestListRejection> {
        if accompanying_guests > self.table_capacity {
            return Err(GuestListRejection::EntourageTooLarge {
                name: self.name.clone(),
            });
        }
        if self.has_arrived() {
            return Err(GuestListRejection::AlreadyCheckedIn {
                name: self.name.clone(),
            });
        }
        Ok(Self {
            accompanying_guests,
            arrival_time: Some(arrival_time),
            ..self.clone()
        })
    }

    /// Confirm the guest may leave; only arrived guests can check out.
    ///
    /// # Errors
    ///
    /// Returns [`GuestListRejection::NotArrivedYet`] before check-in.
    pub fn ensure_can_check_out(&self) -> Result<(), GuestListRejection> {
        if self.has_arrived() {
            Ok(())
        } else {
            Err(GuestListRejection::NotArrivedYet {
                name: self.name.clone(),
            })
        }
    }

    /// Seats at this guest's table that are currently unoccupied.
    ///
    /// Unarrived guests leave the whole table free. The result is negative
    /// for rows that broke the capacity rule outside this service.
    #[must_use]
    pub fn empty_seats(&self) -> i64 {
        let capacity = i64::from(self.table_capacity);
        if self.has_arrived() {
            capacity - i64::from(self.accompanying_guests)
        } else {
            capacity
        }
    }
}
