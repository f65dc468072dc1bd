//! Bookings: a user's appointment consuming one dose of stock.
//!
//! Lifecycle: `pending -> done` (admin action, purged on the next admin
//! dashboard load) or `pending -> deleted` (admin cancels). There is no way
//! back to `pending`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Accepted booking date format (HTML `<input type="date">`).
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Auto-incremented booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i32);

impl BookingId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

/// Booking status as stored in the free-text status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting the appointment.
    Pending,
    /// Completed; removed on the next admin dashboard load.
    Done,
}

impl BookingStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for booking dates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingDateError {
    /// The date field was blank.
    #[error("date must not be empty")]
    Empty,
    /// The date was not a valid `YYYY-MM-DD` calendar date.
    #[error("date must be a calendar date formatted as YYYY-MM-DD, got '{0}'")]
    Malformed(String),
}

/// Requested appointment date.
///
/// # Examples
/// ```
/// use vaccine_portal::domain::BookingDate;
///
/// let date = BookingDate::parse("2026-03-01").unwrap();
/// assert_eq!(date.to_string(), "2026-03-01");
/// assert!(BookingDate::parse("2026-02-30").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingDate(NaiveDate);

impl BookingDate {
    /// Parse a submitted date.
    pub fn parse(raw: &str) -> Result<Self, BookingDateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BookingDateError::Empty);
        }
        NaiveDate::parse_from_str(trimmed, BOOKING_DATE_FORMAT)
            .map(Self)
            .map_err(|_| BookingDateError::Malformed(trimmed.to_owned()))
    }

    /// Underlying calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BookingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BOOKING_DATE_FORMAT))
    }
}

/// Booking owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(value_type = i32, example = 1)]
    pub id: BookingId,
    #[schema(value_type = i32, example = 1)]
    pub user_id: UserId,
    /// Vaccine name as it was booked.
    #[schema(example = "Covaxin")]
    pub vaccine: String,
    /// Stored date string.
    #[schema(example = "2026-03-01")]
    pub date: String,
    pub status: BookingStatus,
}

/// Booking joined with its owner, as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingView {
    #[schema(value_type = i32, example = 1)]
    pub id: BookingId,
    #[schema(example = "Ada Lovelace")]
    pub user_name: String,
    #[schema(example = "ada@example.com")]
    pub user_email: String,
    #[schema(example = "Covaxin")]
    pub vaccine: String,
    #[schema(example = "2026-03-01")]
    pub date: String,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", BookingStatus::Pending)]
    #[case("done", BookingStatus::Done)]
    fn status_round_trips_storage_text(#[case] raw: &str, #[case] status: BookingStatus) {
        assert_eq!(raw.parse::<BookingStatus>(), Ok(status));
        assert_eq!(status.as_str(), raw);
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "archived".parse::<BookingStatus>(),
            Err(UnknownStatus("archived".into()))
        );
    }

    #[rstest]
    #[case("", BookingDateError::Empty)]
    #[case("tomorrow", BookingDateError::Malformed("tomorrow".into()))]
    #[case("01/03/2026", BookingDateError::Malformed("01/03/2026".into()))]
    #[case("2026-13-01", BookingDateError::Malformed("2026-13-01".into()))]
    fn rejects_bad_dates(#[case] raw: &str, #[case] expected: BookingDateError) {
        assert_eq!(BookingDate::parse(raw), Err(expected));
    }

    #[rstest]
    fn accepts_leap_day() {
        let date = BookingDate::parse(" 2028-02-29 ").expect("leap day");
        assert_eq!(date.to_string(), "2028-02-29");
    }
}
