//! OpenAPI document for the portal.
//!
//! Served through Swagger UI at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{AdminDashboard, UserDashboard};
use crate::domain::{
    AdminBookingView, AdminRequestView, Booking, BookingStatus, Error, ErrorCode, RequestStatus,
    Vaccine, VaccineRequest,
};
use crate::inbound::http::forms::{AdminDashboardForm, LoginForm, RegisterForm, UserDashboardForm};
use crate::inbound::http::views::PageView;

/// Register the session cookie security scheme.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /admin.",
            ))),
        );
    }
}

/// OpenAPI document for the portal pages.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Vaccination portal",
        description = "Form-driven pages for vaccine booking, requests and stock administration."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::accounts::home,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::user_dashboard::user_dashboard,
        crate::inbound::http::user_dashboard::user_dashboard_submit,
        crate::inbound::http::admin::admin_login_page,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::admin::admin_dashboard,
        crate::inbound::http::admin::admin_dashboard_submit,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PageView,
        RegisterForm,
        LoginForm,
        UserDashboardForm,
        AdminDashboardForm,
        UserDashboard,
        AdminDashboard,
        Vaccine,
        Booking,
        BookingStatus,
        AdminBookingView,
        VaccineRequest,
        RequestStatus,
        AdminRequestView,
    )),
    tags(
        (name = "pages", description = "Static pages"),
        (name = "accounts", description = "Registration and login"),
        (name = "bookings", description = "User bookings and requests"),
        (name = "admin", description = "Stock and booking administration"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
