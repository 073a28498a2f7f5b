//! Time-of-day stamp recorded when a guest checks in.

use std::fmt;

use chrono::Timelike;
use mockable::Clock;

/// Wall-clock `hour:minute` at which a guest arrived, e.g. `13:37`.
///
/// Components are rendered without zero padding (`9:5` for 09:05), which is
/// the format existing guest rows and clients already use.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use guest_list::domain::ArrivalTime;
///
/// let time = NaiveTime::from_hms_opt(9, 5, 0).expect("valid time");
/// assert_eq!(ArrivalTime::from_time(&time).as_str(), "9:5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalTime(String);

impl ArrivalTime {
    /// Stamp the current local time reported by `clock`.
    #[must_use]
    pub fn now(clock: &dyn Clock) -> Self {
        Self::from_time(&clock.local())
    }

    /// Render any time-of-day value as an arrival stamp.
    #[must_use]
    pub fn from_time(time: &impl Timelike) -> Self {
        Self(format!("{}:{}", time.hour(), time.minute()))
    }

    /// Rehydrate a persisted stamp; only the empty string means "not arrived".
    ///
    /// This matches the `arrival_time = ''` guard the store applies on
    /// check-in, so any other text, whitespace included, is an arrival.
    #[must_use]
    pub fn from_stored(raw: impl Into<String>) -> Option<Self> {
        let stored = raw.into();
        (!stored.is_empty()).then_some(Self(stored))
    }

    /// Borrow the display text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArrivalTime> for String {
    fn from(value: ArrivalTime) -> Self {
        value.0
    }
}
