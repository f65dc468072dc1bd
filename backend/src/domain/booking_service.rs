//! Booking workflow service.
//!
//! Users book doses and file requests; the admin completes or cancels
//! bookings and discards requests. Stock is only ever decremented inside
//! [`BookingRepository::book_if_available`], which owns the atomicity.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    BookingCommand, BookingRepository, BookingRepositoryError, VaccineRequestRepository,
    VaccineRequestRepositoryError,
};
use crate::domain::{
    Booking, BookingDate, BookingId, Error, Identity, RequestId, VaccineName, VaccineRequest,
};

/// Message shown when a booking cannot take a dose.
pub const VACCINE_UNAVAILABLE_MESSAGE: &str = "Vaccine not available.";

/// Implements [`BookingCommand`].
#[derive(Clone)]
pub struct BookingService<B, R> {
    bookings: Arc<B>,
    requests: Arc<R>,
}

impl<B, R> BookingService<B, R> {
    /// Create a service backed by the booking and request repositories.
    pub fn new(bookings: Arc<B>, requests: Arc<R>) -> Self {
        Self { bookings, requests }
    }
}

pub(crate) fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

pub(crate) fn map_request_error(error: VaccineRequestRepositoryError) -> Error {
    match error {
        VaccineRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("request repository unavailable: {message}"))
        }
        VaccineRequestRepositoryError::Query { message } => {
            Error::internal(format!("request repository error: {message}"))
        }
    }
}

#[async_trait]
impl<B, R> BookingCommand for BookingService<B, R>
where
    B: BookingRepository,
    R: VaccineRequestRepository,
{
    async fn create_booking(
        &self,
        identity: &Identity,
        vaccine: &VaccineName,
        date: BookingDate,
    ) -> Result<Booking, Error> {
        let user = identity.require_user()?;
        let booked = self
            .bookings
            .book_if_available(user.id, vaccine, date)
            .await
            .map_err(map_booking_error)?;
        match booked {
            Some(booking) => {
                info!(
                    booking_id = %booking.id,
                    user_id = %user.id,
                    vaccine = %booking.vaccine,
                    date = %booking.date,
                    "booking created"
                );
                Ok(booking)
            }
            None => {
                debug!(user_id = %user.id, vaccine = %vaccine, "booking rejected: no stock");
                Err(Error::vaccine_unavailable(VACCINE_UNAVAILABLE_MESSAGE))
            }
        }
    }

    async fn request_vaccine(
        &self,
        identity: &Identity,
        vaccine: &VaccineName,
    ) -> Result<VaccineRequest, Error> {
        let user = identity.require_user()?;
        let request = self
            .requests
            .create(user.id, vaccine)
            .await
            .map_err(map_request_error)?;
        info!(
            request_id = %request.id,
            user_id = %user.id,
            vaccine = %request.vaccine_name,
            "vaccine requested"
        );
        Ok(request)
    }

    async fn mark_done(&self, identity: &Identity, booking_id: BookingId) -> Result<(), Error> {
        identity.require_admin()?;
        let matched = self
            .bookings
            .mark_done(booking_id)
            .await
            .map_err(map_booking_error)?;
        if matched {
            info!(%booking_id, "booking marked done");
        } else {
            debug!(%booking_id, "mark done ignored: unknown booking");
        }
        Ok(())
    }

    async fn delete_booking(
        &self,
        identity: &Identity,
        booking_id: BookingId,
    ) -> Result<(), Error> {
        identity.require_admin()?;
        let matched = self
            .bookings
            .delete(booking_id)
            .await
            .map_err(map_booking_error)?;
        if matched {
            info!(%booking_id, "booking deleted");
        } else {
            debug!(%booking_id, "delete ignored: unknown booking");
        }
        Ok(())
    }

    async fn delete_request(
        &self,
        identity: &Identity,
        request_id: RequestId,
    ) -> Result<(), Error> {
        identity.require_admin()?;
        let matched = self
            .requests
            .delete(request_id)
            .await
            .map_err(map_request_error)?;
        if matched {
            info!(%request_id, "request deleted");
        } else {
            debug!(%request_id, "delete ignored: unknown request");
        }
        Ok(())
    }
}
