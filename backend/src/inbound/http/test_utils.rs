//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::AdminCredentials;
use crate::domain::ports::{
    MockAccountCommand, MockBookingCommand, MockDashboardQuery, MockInventoryCommand,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie issued by `response`, if any.
pub fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub inventory: MockInventoryCommand,
    pub bookings: MockBookingCommand,
    pub dashboards: MockDashboardQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                accounts: Arc::new(self.accounts),
                inventory: Arc::new(self.inventory),
                bookings: Arc::new(self.bookings),
                dashboards: Arc::new(self.dashboards),
            },
            AdminCredentials::default(),
        )
    }
}
