//! Business-rule outcomes for guest list operations.
//!
//! Rule violations are ordinary results rather than errors: each carries the
//! message shown to the caller and a stable [`ErrorCode`] the transport can
//! turn into a status.

use thiserror::Error;

use super::{ErrorCode, GuestName};

/// A guest list rule that rejected the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestListRejection {
    /// The registered entourage does not fit at the requested table.
    // Message kept byte-for-byte for existing clients.
    #[error(
        "Guest will no be added to the guest list: guest's table cannot hold so many people."
    )]
    TableTooSmall,
    /// A guest with this name is already registered.
    #[error("Guest {name} is already in the guest list")]
    AlreadyInGuestList {
        /// Guest named in the request.
        name: GuestName,
    },
    /// No guest with this name is registered.
    #[error("Guest {name} is not in the guest list")]
    NotInGuestList {
        /// Guest named in the request.
        name: GuestName,
    },
    /// More people arrived than the table seats.
    #[error("Guest {name} arrived with an entourage bigger than the registered one")]
    EntourageTooLarge {
        /// Guest named in the request.
        name: GuestName,
    },
    /// The guest has already checked in.
    #[error("Guest {name} already checked in")]
    AlreadyCheckedIn {
        /// Guest named in the request.
        name: GuestName,
    },
    /// Check-out was requested before check-in.
    #[error("Guest {name} has not arrived yet")]
    NotArrivedYet {
        /// Guest named in the request.
        name: GuestName,
    },
}

impl GuestListRejection {
    /// Machine-readable category of the violated rule.
    ///
    /// # Examples
    /// ```
    /// use guest_list::domain::{ErrorCode, GuestListRejection, GuestName};
    ///
    /// let name = GuestName::new("Ana").expect("valid name");
    /// let rejection = GuestListRejection::NotInGuestList { name };
    /// assert_eq!(rejection.code(), ErrorCode::NotFound);
    /// assert_eq!(rejection.to_string(), "Guest Ana is not in the guest list");
    /// ```
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::TableTooSmall | Self::EntourageTooLarge { .. } => ErrorCode::InvalidRequest,
            Self::NotInGuestList { .. } => ErrorCode::NotFound,
            Self::AlreadyInGuestList { .. }
            | Self::AlreadyCheckedIn { .. }
            | Self::NotArrivedYet { .. } => ErrorCode::Conflict,
        }
    }
}

/// Result of a guest list command that passed infrastructure checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestListOutcome<T> {
    /// All rules passed and the change was stored.
    Accepted(T),
    /// A rule rejected the request; nothing was stored.
    Rejected(GuestListRejection),
}

impl<T> GuestListOutcome<T> {
    /// Transform the accepted payload, leaving rejections untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GuestListOutcome<U> {
        match self {
            Self::Accepted(value) => GuestListOutcome::Accepted(f(value)),
            Self::Rejected(rejection) => GuestListOutcome::Rejected(rejection),
        }
    }

    /// Return the rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&GuestListRejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl<T> From<Result<T, GuestListRejection>> for GuestListOutcome<T> {
    fn from(value: Result<T, GuestListRejection>) -> Self {
        match value {
            Ok(accepted) => Self::Accepted(accepted),
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}
