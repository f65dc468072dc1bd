//! Page payloads and redirects.
//!
//! Markup lives outside this service; each GET on a form page answers with
//! a small descriptor naming the page, where it posts and which fields it
//! expects.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const HOME_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const USER_DASHBOARD_PATH: &str = "/user_dashboard";
pub const ADMIN_LOGIN_PATH: &str = "/admin";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin_dashboard";

/// Descriptor for a static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    #[schema(example = "login")]
    pub page: String,
    /// Form target, when the page has a form.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/login")]
    pub action: Option<String>,
    /// Form fields, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Navigation targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl PageView {
    fn form(page: &str, action: &str, fields: &[&str]) -> Self {
        Self {
            page: page.to_owned(),
            action: Some(action.to_owned()),
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
            links: Vec::new(),
        }
    }

    /// Landing page linking to every entry point.
    pub fn home() -> Self {
        Self {
            page: "home".to_owned(),
            action: None,
            fields: Vec::new(),
            links: [REGISTER_PATH, LOGIN_PATH, ADMIN_LOGIN_PATH]
                .iter()
                .map(|l| (*l).to_owned())
                .collect(),
        }
    }

    pub fn register() -> Self {
        Self::form("register", REGISTER_PATH, &["name", "email", "password"])
    }

    pub fn login() -> Self {
        Self::form("login", LOGIN_PATH, &["email", "password"])
    }

    pub fn admin_login() -> Self {
        Self::form("admin_login", ADMIN_LOGIN_PATH, &["email", "password"])
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    fn redirect_sets_location() {
        let response = see_other(LOGIN_PATH);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[rstest]
    fn home_omits_form_fields() {
        let value = serde_json::to_value(PageView::home()).expect("serialise");
        assert!(value.get("action").is_none());
        assert!(value.get("fields").is_none());
        assert_eq!(value["links"][0], "/register");
    }
}
