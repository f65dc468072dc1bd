//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Account use-cases consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user account.
    ///
    /// # Errors
    ///
    /// Returns a `Conflict` error when the e-mail is already registered.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Authenticate by exact e-mail and password match.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when no user matches.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
