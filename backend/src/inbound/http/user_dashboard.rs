//! User dashboard: stock list, own bookings and requests.
//!
//! ```text
//! GET  /user_dashboard
//! POST /user_dashboard   vaccine=Covaxin&date=2026-03-01
//! POST /user_dashboard   request_vaccine=Sputnik%20X
//! ```
//!
//! Visitors without a user session are redirected to `/login`.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::UserDashboard;
use crate::domain::{ApiResult, Error, Identity};
use crate::inbound::http::error::inline_failure;
use crate::inbound::http::forms::{UserAction, UserDashboardForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{LOGIN_PATH, see_other};

async fn render(state: &HttpState, identity: &Identity) -> ApiResult<HttpResponse> {
    let dashboard = state.dashboards.user_dashboard(identity).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Show the dashboard.
#[utoipa::path(
    get,
    path = "/user_dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = UserDashboard),
        (status = 303, description = "No user session; continue at /login"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "userDashboard",
    security(("SessionCookie" = []))
)]
#[get("/user_dashboard")]
pub async fn user_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    if identity.current_user_id().is_none() {
        return Ok(see_other(LOGIN_PATH));
    }
    render(&state, &identity).await
}

/// Book a dose or request a vaccine, then show the dashboard.
///
/// An unavailable vaccine replaces the page with "❌ Vaccine not available."
#[utoipa::path(
    post,
    path = "/user_dashboard",
    request_body(content = UserDashboardForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Dashboard data or inline failure message", body = UserDashboard),
        (status = 303, description = "No user session; continue at /login"),
        (status = 400, description = "Invalid form", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "userDashboardSubmit",
    security(("SessionCookie" = []))
)]
#[post("/user_dashboard")]
pub async fn user_dashboard_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<UserDashboardForm>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    if identity.current_user_id().is_none() {
        return Ok(see_other(LOGIN_PATH));
    }
    match form.into_inner().into_action()? {
        Some(UserAction::Book { vaccine, date }) => {
            if let Err(err) = state.bookings.create_booking(&identity, &vaccine, date).await {
                return inline_failure(err);
            }
        }
        Some(UserAction::Request { vaccine }) => {
            state.bookings.request_vaccine(&identity, &vaccine).await?;
        }
        None => {}
    }
    render(&state, &identity).await
}
