//! Driven port for bookings.

use async_trait::async_trait;

use crate::domain::{AdminBookingView, Booking, BookingDate, BookingId, UserId, VaccineName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Booking rows and the stock decrement that comes with them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically take one dose of `vaccine` and record a pending booking.
    ///
    /// Returns `None`, with no write performed, when the vaccine is unknown or
    /// its stock is not positive at decision time. Concurrent callers racing
    /// for the last dose must see exactly one success.
    async fn book_if_available(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
        date: BookingDate,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Bookings owned by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Every booking joined with its owner, oldest first.
    async fn list_all(&self) -> Result<Vec<AdminBookingView>, BookingRepositoryError>;

    /// Set the status to `done`; returns whether a row matched.
    async fn mark_done(&self, id: BookingId) -> Result<bool, BookingRepositoryError>;

    /// Delete the booking; returns whether a row matched.
    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError>;

    /// Delete every `done` booking; returns the number removed.
    async fn purge_done(&self) -> Result<usize, BookingRepositoryError>;
}
