//! Authentication primitives: login credentials and the fixed admin pair.
//!
//! Passwords are compared verbatim; the portal keeps the plaintext contract of
//! its original deployment. Secrets are held in [`Zeroizing`] buffers so they
//! are wiped once dropped.

use zeroize::Zeroizing;

use super::{Email, Error, UserValidationError};

/// Default admin login e-mail.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@portal.com";
/// Default admin password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
/// Message shown when an admin login fails.
pub const INVALID_ADMIN_CREDENTIALS_MESSAGE: &str = "Invalid admin credentials!";

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed through [`Email::new`] and compared verbatim.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use vaccine_portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Portal.com", "admin123").unwrap();
/// assert_eq!(creds.email().as_ref(), "Admin@Portal.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, UserValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed e-mail used for lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The single admin credential pair. Admins are not user rows.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Build the admin pair from configured values.
    pub fn try_new(email: &str, password: &str) -> Result<Self, UserValidationError> {
        let LoginCredentials { email, password } = LoginCredentials::try_from_parts(email, password)?;
        Ok(Self { email, password })
    }

    /// Check submitted credentials against the admin pair.
    pub fn verify(&self, credentials: &LoginCredentials) -> Result<(), Error> {
        if credentials.email() == &self.email && credentials.password() == self.password.as_str() {
            Ok(())
        } else {
            Err(Error::unauthorized(INVALID_ADMIN_CREDENTIALS_MESSAGE))
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: Email::from_trusted(DEFAULT_ADMIN_EMAIL),
            password: Zeroizing::new(DEFAULT_ADMIN_PASSWORD.to_owned()),
        }
    }
}
