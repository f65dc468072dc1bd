//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, Registration, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The e-mail is already registered.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// User rows: created at registration, looked up at login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` when the e-mail exists.
    async fn create(&self, registration: &Registration) -> Result<User, UserPersistenceError>;

    /// Find the user whose e-mail and password both match exactly.
    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, UserPersistenceError>;
}
