//! Driving port for the booking workflow.
//!
//! Users create bookings and requests; admins complete or cancel bookings and
//! discard requests. Admin mutations on unknown ids succeed silently.

use async_trait::async_trait;

use crate::domain::{
    Booking, BookingDate, BookingId, Error, Identity, RequestId, VaccineName, VaccineRequest,
};

/// Booking and request mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Book one dose of `vaccine` for the calling user.
    ///
    /// # Errors
    ///
    /// Returns `VaccineUnavailable` when the vaccine is unknown or out of
    /// stock; nothing is written in that case.
    async fn create_booking(
        &self,
        identity: &Identity,
        vaccine: &VaccineName,
        date: BookingDate,
    ) -> Result<Booking, Error>;

    /// File a pending request for `vaccine`.
    async fn request_vaccine(
        &self,
        identity: &Identity,
        vaccine: &VaccineName,
    ) -> Result<VaccineRequest, Error>;

    /// Mark a booking as done.
    async fn mark_done(&self, identity: &Identity, booking_id: BookingId) -> Result<(), Error>;

    /// Cancel a booking.
    async fn delete_booking(&self, identity: &Identity, booking_id: BookingId)
    -> Result<(), Error>;

    /// Discard a request.
    async fn delete_request(&self, identity: &Identity, request_id: RequestId)
    -> Result<(), Error>;
}
