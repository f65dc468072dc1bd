//! HTTP inbound adapter serving the portal pages.
//!
//! Handlers extract a [`session::SessionContext`], turn it into an explicit
//! [`crate::domain::Identity`] and call the driving ports held in
//! [`state::HttpState`].

pub mod accounts;
pub mod admin;
pub mod error;
pub mod forms;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod user_dashboard;
pub mod views;

use actix_web::{HttpRequest, error::UrlencodedError, web};

use crate::domain::Error;

/// Register every portal page on `cfg`.
///
/// Session middleware and shared state are supplied by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use vaccine_portal::inbound::http::portal_routes;
///
/// let _app = App::new().configure(portal_routes);
/// ```
pub fn portal_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(accounts::home)
        .service(accounts::register_page)
        .service(accounts::register)
        .service(accounts::login_page)
        .service(accounts::login)
        .service(accounts::logout)
        .service(user_dashboard::user_dashboard)
        .service(user_dashboard::user_dashboard_submit)
        .service(admin::admin_login_page)
        .service(admin::admin_login)
        .service(admin::admin_dashboard)
        .service(admin::admin_dashboard_submit);
}

/// Form extractor settings answering undecodable bodies with the JSON
/// error envelope.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err: UrlencodedError, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed form body: {err}")).into()
    })
}
