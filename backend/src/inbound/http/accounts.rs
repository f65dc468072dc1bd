//! Visitor-facing account pages.
//!
//! ```text
//! GET  /            landing page
//! GET  /register    registration form
//! POST /register    name=..&email=..&password=..
//! GET  /login       login form
//! POST /login       email=..&password=..
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::{debug, info};

use crate::domain::{ApiResult, Error, INVALID_CREDENTIALS_MESSAGE, Registration};
use crate::inbound::http::error::inline_failure;
use crate::inbound::http::forms::{LoginForm, RegisterForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    HOME_PATH, LOGIN_PATH, PageView, USER_DASHBOARD_PATH, see_other,
};

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = PageView)),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home() -> web::Json<PageView> {
    web::Json(PageView::home())
}

/// Registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form", body = PageView)),
    tags = ["accounts"],
    operation_id = "registerPage",
    security([])
)]
#[get("/register")]
pub async fn register_page() -> web::Json<PageView> {
    web::Json(PageView::register())
}

/// Create an account, then send the visitor to the login form.
///
/// A taken e-mail replaces the page with "❌ User already exists!".
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered; continue at /login"),
        (status = 200, description = "Inline failure message", body = String),
        (status = 400, description = "Invalid form", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(form.into_inner())?;
    match state.accounts.register(&registration).await {
        Ok(user) => {
            info!(user_id = %user.id(), "account registered");
            Ok(see_other(LOGIN_PATH))
        }
        Err(err) => inline_failure(err),
    }
}

/// Login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = PageView)),
    tags = ["accounts"],
    operation_id = "loginPage",
    security([])
)]
#[get("/login")]
pub async fn login_page() -> web::Json<PageView> {
    web::Json(PageView::login())
}

/// Check credentials and start a user session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in; continue at /user_dashboard",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 200, description = "Inline failure message", body = String),
        (status = 400, description = "Missing form field", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match form.into_inner().into_credentials(INVALID_CREDENTIALS_MESSAGE) {
        Ok(credentials) => credentials,
        Err(err) => return inline_failure(err),
    };
    match state.accounts.login(&credentials).await {
        Ok(user) => {
            session.establish_user_session(user.id(), user.name())?;
            debug!(user_id = %user.id(), "user session established");
            Ok(see_other(USER_DASHBOARD_PATH))
        }
        Err(err) => inline_failure(err),
    }
}

/// Forget every login held by the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared; continue at /")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear_session();
    see_other(HOME_PATH)
}
