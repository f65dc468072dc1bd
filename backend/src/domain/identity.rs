//! Request-scoped caller identity.
//!
//! Inbound adapters derive an [`Identity`] from whatever session mechanism
//! they use and pass it explicitly to every driving port. Services decide
//! access from this value alone.

use super::{Error, UserId, UserName};

/// Authenticated portal user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Stable identifier.
    pub id: UserId,
    /// Display name captured at login.
    pub name: UserName,
}

/// Who is calling.
///
/// A single browser session can carry a user login and the admin flag at the
/// same time; both are honoured independently.
///
/// # Examples
/// ```
/// use vaccine_portal::domain::{Identity, UserId, UserName};
///
/// let anonymous = Identity::anonymous();
/// assert!(anonymous.require_user().is_err());
///
/// let admin = Identity::anonymous().with_admin();
/// assert!(admin.is_admin());
/// assert!(admin.current_user_id().is_none());
///
/// let user = Identity::user(UserId::new(1), UserName::new("Ada").unwrap());
/// assert_eq!(user.current_user_id(), Some(UserId::new(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    user: Option<SessionUser>,
    admin: bool,
}

impl Identity {
    /// No session established.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a logged-in user.
    pub fn user(id: UserId, name: UserName) -> Self {
        Self {
            user: Some(SessionUser { id, name }),
            admin: false,
        }
    }

    /// Add the admin flag.
    #[must_use]
    pub fn with_admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Logged-in user id, if any.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Logged-in user name, if any.
    pub fn current_user_name(&self) -> Option<&UserName> {
        self.user.as_ref().map(|user| &user.name)
    }

    /// Whether the admin session is established.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Require a user session.
    pub fn require_user(&self) -> Result<&SessionUser, Error> {
        self.user
            .as_ref()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require the admin session.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.admin {
            Ok(())
        } else {
            Err(Error::unauthorized("admin login required"))
        }
    }
}
