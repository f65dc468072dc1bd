//! Account domain service: registration and user login.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{AccountCommand, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, Registration, User};

/// Message shown when registering an e-mail twice.
pub const DUPLICATE_USER_MESSAGE: &str = "User already exists!";
/// Message shown when no user matches the submitted credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials!";

/// Implements [`AccountCommand`] on top of a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a service backed by `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => duplicate_user(),
    }
}

fn duplicate_user() -> Error {
    Error::conflict(DUPLICATE_USER_MESSAGE).with_details(json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        match self.users.create(registration).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user registered");
                Ok(user)
            }
            Err(UserPersistenceError::DuplicateEmail { email }) => {
                debug!(%email, "registration rejected: e-mail already registered");
                Err(duplicate_user())
            }
            Err(other) => Err(map_user_error(other)),
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_credentials(credentials)
            .await
            .map_err(map_user_error)?;
        match user {
            Some(user) => {
                info!(user_id = %user.id(), "user logged in");
                Ok(user)
            }
            None => {
                debug!(email = %credentials.email(), "login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{Email, ErrorCode, UserId, UserName};
    use rstest::rstest;

    fn ada() -> User {
        User::new(
            UserId::new(1),
            UserName::new("Ada").expect("name"),
            Email::new("ada@example.com").expect("email"),
        )
    }

    fn registration() -> Registration {
        Registration::try_from_parts("Ada", "ada@example.com", "pw").expect("registration")
    }

    fn service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
        AccountService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn register_returns_created_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|reg| reg.email().as_ref() == "ada@example.com" && reg.password() == "pw")
            .times(1)
            .return_once(|_| Ok(ada()));

        let user = service(repo)
            .register(&registration())
            .await
            .expect("registered");
        assert_eq!(user.id(), UserId::new(1));
    }

    #[tokio::test]
    async fn register_maps_duplicate_email_to_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));

        let err = service(repo)
            .register(&registration())
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_USER_MESSAGE);
        assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!("email"))
        );
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn login_maps_repository_failures(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .times(1)
            .return_once(move |_| Err(failure));
        let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("creds");

        let err = service(repo).login(&creds).await.expect_err("failure");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn login_without_match_is_unauthorized() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .times(1)
            .return_once(|_| Ok(None));
        let creds = LoginCredentials::try_from_parts("ada@example.com", "nope").expect("creds");

        let err = service(repo).login(&creds).await.expect_err("no match");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn login_returns_matching_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .times(1)
            .return_once(|_| Ok(Some(ada())));
        let creds = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("creds");

        let user = service(repo).login(&creds).await.expect("login");
        assert_eq!(user.name().as_ref(), "Ada");
    }
}
