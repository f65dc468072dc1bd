//! Cookie session wrapper that yields an explicit [`Identity`].
//!
//! Handlers never read session keys directly. They extract a
//! [`SessionContext`], establish or clear logins through it, and pass the
//! resulting [`Identity`] to the driving ports.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity, UserId, UserName};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_NAME_KEY: &str = "user_name";
pub(crate) const ADMIN_KEY: &str = "admin";

fn write_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

fn read_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

/// Newtype over the Actix session exposing login operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a user login. An existing admin flag is kept.
    pub fn establish_user_session(&self, id: UserId, name: &UserName) -> Result<(), Error> {
        self.0.insert(USER_ID_KEY, id.value()).map_err(write_failed)?;
        self.0
            .insert(USER_NAME_KEY, name.as_ref())
            .map_err(write_failed)?;
        self.0.renew();
        Ok(())
    }

    /// Record the admin login. An existing user login is kept.
    pub fn establish_admin_session(&self) -> Result<(), Error> {
        self.0.insert(ADMIN_KEY, true).map_err(write_failed)?;
        self.0.renew();
        Ok(())
    }

    /// Forget both the user and the admin login.
    pub fn clear_session(&self) {
        self.0.purge();
    }

    /// Identity carried by the cookie.
    ///
    /// A cookie whose user entry cannot be decoded is treated as carrying no
    /// user login.
    pub fn identity(&self) -> Result<Identity, Error> {
        let admin = self
            .0
            .get::<bool>(ADMIN_KEY)
            .map_err(read_failed)?
            .unwrap_or(false);
        let identity = match self.user()? {
            Some((id, name)) => Identity::user(id, name),
            None => Identity::anonymous(),
        };
        Ok(if admin { identity.with_admin() } else { identity })
    }

    fn user(&self) -> Result<Option<(UserId, UserName)>, Error> {
        let id = match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "undecodable user id in session cookie");
                return Ok(None);
            }
        };
        let Some(id) = id else {
            return Ok(None);
        };
        let raw_name = self
            .0
            .get::<String>(USER_NAME_KEY)
            .map_err(read_failed)?
            .unwrap_or_default();
        match UserName::new(raw_name) {
            Ok(name) => Ok(Some((UserId::new(id), name))),
            Err(error) => {
                warn!(%error, "invalid user name in session cookie");
                Ok(None)
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::inbound::http::test_utils::{session_cookie as issued_cookie, test_session_middleware};

    fn describe(identity: &Identity) -> String {
        format!(
            "{}|{}|{}",
            identity
                .current_user_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            identity
                .current_user_name()
                .map(ToString::to_string)
                .unwrap_or_default(),
            identity.is_admin()
        )
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().body(describe(&session.identity()?)))
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        issued_cookie(res).expect("session cookie set")
    }

    macro_rules! session_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .route(
                        "/user",
                        web::get().to(|session: SessionContext| async move {
                            let name = UserName::new("Ada").expect("fixture name");
                            session.establish_user_session(UserId::new(7), &name)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }),
                    )
                    .route(
                        "/admin",
                        web::get().to(|session: SessionContext| async move {
                            session.establish_admin_session()?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }),
                    )
                    .route(
                        "/tamper",
                        web::get().to(|session: Session| async move {
                            session
                                .insert(USER_ID_KEY, "not-a-number")
                                .expect("set invalid user id");
                            HttpResponse::Ok()
                        }),
                    )
                    .route(
                        "/logout",
                        web::get().to(|session: SessionContext| async move {
                            session.clear_session();
                            HttpResponse::Ok()
                        }),
                    )
                    .route("/whoami", web::get().to(whoami)),
            )
            .await
        };
    }

    #[rstest]
    #[actix_web::test]
    async fn fresh_session_is_anonymous() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "||false");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_login_keeps_user_login() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/user").to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin").cookie(cookie).to_request(),
        )
        .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "7|Ada|true");
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_clears_everything() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        let cleared = session_cookie(&res);
        assert!(cleared.value().is_empty(), "logout sends a removal cookie");

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(test::read_body(res).await, "||false");
    }

    #[rstest]
    #[actix_web::test]
    async fn tampered_user_id_is_anonymous() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "||false");
    }
}
