//! Domain types, ports and services for the vaccination portal.
//!
//! Purpose: keep the booking and inventory rules independent of HTTP and
//! persistence. Inbound adapters hand an explicit [`Identity`] to the driving
//! ports; services enforce access and map driven-port failures into
//! [`Error`].
//!
//! Public surface:
//! - Value objects: [`UserName`], [`Email`], [`VaccineName`], [`StockAmount`],
//!   [`BookingDate`].
//! - Records: [`User`], [`Vaccine`], [`Booking`], [`VaccineRequest`].
//! - Services: [`AccountService`], [`InventoryService`], [`BookingService`],
//!   [`DashboardService`].

pub mod account_service;
pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod dashboard_service;
pub mod error;
pub mod identity;
pub mod inventory_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod vaccine;
pub mod vaccine_request;

pub use self::account_service::{
    AccountService, DUPLICATE_USER_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
};
pub use self::auth::{
    AdminCredentials, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, INVALID_ADMIN_CREDENTIALS_MESSAGE,
    LoginCredentials,
};
pub use self::booking::{
    AdminBookingView, BOOKING_DATE_FORMAT, Booking, BookingDate, BookingDateError, BookingId,
    BookingStatus, UnknownStatus,
};
pub use self::booking_service::{BookingService, VACCINE_UNAVAILABLE_MESSAGE};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Identity, SessionUser};
pub use self::inventory_service::{InventoryService, seed_default_vaccines};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, Registration, USER_NAME_MAX, User, UserId, UserName, UserValidationError,
};
pub use self::vaccine::{
    DEFAULT_VACCINES, RestockOutcome, StockAmount, VACCINE_NAME_MAX, Vaccine, VaccineId,
    VaccineName, VaccineValidationError,
};
pub use self::vaccine_request::{AdminRequestView, RequestId, RequestStatus, VaccineRequest};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use vaccine_portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
