//! Admin login and dashboard.
//!
//! ```text
//! GET  /admin             admin login form
//! POST /admin             email=admin@portal.com&password=..
//! GET  /admin_dashboard
//! POST /admin_dashboard   delete_id=.. | done_id=.. | new_vaccine=..&new_stock=..
//!                         | restock_id=..&restock_amount=.. | delete_request=..
//! ```
//!
//! Every dashboard read, including the one after a POST, first removes
//! bookings marked done.

use actix_web::{HttpResponse, get, post, web};
use tracing::{info, warn};

use crate::domain::ports::AdminDashboard;
use crate::domain::{ApiResult, Error, INVALID_ADMIN_CREDENTIALS_MESSAGE, Identity};
use crate::inbound::http::error::inline_failure;
use crate::inbound::http::forms::{AdminAction, AdminDashboardForm, LoginForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{ADMIN_DASHBOARD_PATH, ADMIN_LOGIN_PATH, PageView, see_other};

/// Admin login form.
#[utoipa::path(
    get,
    path = "/admin",
    responses((status = 200, description = "Admin login form", body = PageView)),
    tags = ["admin"],
    operation_id = "adminLoginPage",
    security([])
)]
#[get("/admin")]
pub async fn admin_login_page() -> web::Json<PageView> {
    web::Json(PageView::admin_login())
}

/// Check the admin pair and flag the session.
#[utoipa::path(
    post,
    path = "/admin",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Admin session established; continue at /admin_dashboard"),
        (status = 200, description = "Inline failure message", body = String),
        (status = 400, description = "Missing form field", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/admin")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let verified = form
        .into_inner()
        .into_credentials(INVALID_ADMIN_CREDENTIALS_MESSAGE)
        .and_then(|credentials| state.admin.verify(&credentials));
    if let Err(err) = verified {
        warn!("admin login rejected");
        return inline_failure(err);
    }
    session.establish_admin_session()?;
    info!("admin session established");
    Ok(see_other(ADMIN_DASHBOARD_PATH))
}

async fn render(state: &HttpState, identity: &Identity) -> ApiResult<HttpResponse> {
    let dashboard = state.dashboards.admin_dashboard(identity).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

async fn apply(state: &HttpState, identity: &Identity, action: AdminAction) -> ApiResult<()> {
    match action {
        AdminAction::DeleteBooking(id) => state.bookings.delete_booking(identity, id).await,
        AdminAction::MarkDone(id) => state.bookings.mark_done(identity, id).await,
        AdminAction::AddOrRestock { vaccine, amount } => state
            .inventory
            .add_or_restock(identity, &vaccine, amount)
            .await
            .map(drop),
        AdminAction::Restock { vaccine, amount } => state
            .inventory
            .restock(identity, &vaccine, amount)
            .await
            .map(drop),
        AdminAction::DeleteRequest(id) => state.bookings.delete_request(identity, id).await,
    }
}

/// Show every booking, vaccine and request.
#[utoipa::path(
    get,
    path = "/admin_dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = AdminDashboard),
        (status = 303, description = "No admin session; continue at /admin"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboard",
    security(("SessionCookie" = []))
)]
#[get("/admin_dashboard")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    if !identity.is_admin() {
        return Ok(see_other(ADMIN_LOGIN_PATH));
    }
    render(&state, &identity).await
}

/// Apply exactly one admin action, then show the dashboard.
#[utoipa::path(
    post,
    path = "/admin_dashboard",
    request_body(content = AdminDashboardForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Dashboard data", body = AdminDashboard),
        (status = 303, description = "No admin session; continue at /admin"),
        (status = 400, description = "Invalid or missing action", body = Error),
        (status = 404, description = "Restock of an unknown vaccine", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboardSubmit",
    security(("SessionCookie" = []))
)]
#[post("/admin_dashboard")]
pub async fn admin_dashboard_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AdminDashboardForm>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    if !identity.is_admin() {
        return Ok(see_other(ADMIN_LOGIN_PATH));
    }
    let action = AdminAction::try_from(form.into_inner())?;
    apply(&state, &identity, action).await?;
    render(&state, &identity).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::{App, test};
    use mockall::Sequence;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::{BookingId, RequestId, RestockOutcome, Vaccine, VaccineId};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

    fn empty_dashboard() -> AdminDashboard {
        AdminDashboard {
            bookings: Vec::new(),
            vaccines: Vec::new(),
            requests: Vec::new(),
        }
    }

    fn outcome(name: &str, stock: i32, created: bool) -> RestockOutcome {
        RestockOutcome {
            vaccine: Vaccine {
                id: VaccineId::new(4),
                name: name.to_owned(),
                stock,
            },
            created,
            requests_resolved: 1,
        }
    }

    macro_rules! admin_app {
        ($ports:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ports.into_state()))
                    .wrap(test_session_middleware())
                    .service(admin_login_page)
                    .service(admin_login)
                    .service(admin_dashboard)
                    .service(admin_dashboard_submit),
            )
            .await
        };
    }

    macro_rules! admin_cookie {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/admin")
                .set_form([("email", "admin@portal.com"), ("password", "admin123")])
                .to_request();
            let res = test::call_service(&$app, req).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            session_cookie(&res).expect("admin session cookie")
        }};
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_login_redirects_to_dashboard() {
        let app = admin_app!(MockPorts::default());
        let req = test::TestRequest::post()
            .uri("/admin")
            .set_form([("email", "admin@portal.com"), ("password", "admin123")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/admin_dashboard")
        );
    }

    #[rstest]
    #[case("admin@portal.com", "wrong")]
    #[case("someone@portal.com", "admin123")]
    #[case("ADMIN@PORTAL.COM", "admin123")]
    #[case("not-an-email", "admin123")]
    #[case("admin@portal.com", "")]
    #[actix_web::test]
    async fn wrong_admin_pair_is_reported_inline(#[case] email: &str, #[case] password: &str) {
        let app = admin_app!(MockPorts::default());
        let req = test::TestRequest::post()
            .uri("/admin")
            .set_form([("email", email), ("password", password)])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_none());
        assert_eq!(test::read_body(res).await, "❌ Invalid admin credentials!");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_login_without_password_is_malformed() {
        let app = admin_app!(MockPorts::default());
        let req = test::TestRequest::post()
            .uri("/admin")
            .set_form([("email", "admin@portal.com")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(session_cookie(&res).is_none());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "password");
        assert_eq!(body["details"]["code"], "missing_field");
    }

    #[rstest]
    #[actix_web::test]
    async fn dashboard_requires_admin_session() {
        let app = admin_app!(MockPorts::default());
        let uri = "/admin_dashboard";
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/admin")
        );

        let req = test::TestRequest::post()
            .uri(uri)
            .set_form([("delete_id", "1")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[rstest]
    #[actix_web::test]
    async fn add_vaccine_runs_before_dashboard_read() {
        let mut ports = MockPorts::default();
        let mut seq = Sequence::new();
        ports
            .inventory
            .expect_add_or_restock()
            .withf(|identity, vaccine, amount| {
                identity.is_admin() && vaccine.as_ref() == "Sputnik X" && amount.value() == 5
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(outcome("Sputnik X", 5, true)));
        ports
            .dashboards
            .expect_admin_dashboard()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(empty_dashboard()));
        let app = admin_app!(ports);
        let cookie = admin_cookie!(app);

        let req = test::TestRequest::post()
            .uri("/admin_dashboard")
            .cookie(cookie)
            .set_form([("new_vaccine", " Sputnik X "), ("new_stock", "5")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn booking_actions_reach_the_booking_port() {
        let mut ports = MockPorts::default();
        ports
            .bookings
            .expect_mark_done()
            .withf(|_, id| *id == BookingId::new(3))
            .times(1)
            .returning(|_, _| Ok(()));
        ports
            .bookings
            .expect_delete_request()
            .withf(|_, id| *id == RequestId::new(8))
            .times(1)
            .returning(|_, _| Ok(()));
        ports
            .dashboards
            .expect_admin_dashboard()
            .times(2)
            .returning(|_| Ok(empty_dashboard()));
        let app = admin_app!(ports);
        let cookie = admin_cookie!(app);

        for form in [[("done_id", "3")], [("delete_request", "8")]] {
            let req = test::TestRequest::post()
                .uri("/admin_dashboard")
                .cookie(cookie.clone())
                .set_form(form)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_stock_is_rejected_without_side_effects() {
        let mut ports = MockPorts::default();
        ports.inventory.expect_add_or_restock().never();
        ports.dashboards.expect_admin_dashboard().never();
        let app = admin_app!(ports);
        let cookie = admin_cookie!(app);

        let req = test::TestRequest::post()
            .uri("/admin_dashboard")
            .cookie(cookie)
            .set_form([("new_vaccine", "Zeta"), ("new_stock", "lots")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "new_stock");
        assert_eq!(body["details"]["code"], "amount_not_a_number");
    }

    #[rstest]
    #[actix_web::test]
    async fn restock_of_unknown_vaccine_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .inventory
            .expect_restock()
            .returning(|_, _, _| Err(Error::not_found("vaccine 'Zeta' does not exist")));
        let app = admin_app!(ports);
        let cookie = admin_cookie!(app);

        let req = test::TestRequest::post()
            .uri("/admin_dashboard")
            .cookie(cookie)
            .set_form([("restock_id", "Zeta"), ("restock_amount", "3")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn form_without_action_is_rejected() {
        let app = admin_app!(MockPorts::default());
        let cookie = admin_cookie!(app);

        let req = test::TestRequest::post()
            .uri("/admin_dashboard")
            .cookie(cookie)
            .set_form([("restock_id", "Covaxin")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
