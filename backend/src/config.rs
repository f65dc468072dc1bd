//! Portal settings loaded via OrthoConfig.
//!
//! Values layer as CLI flags over `PORTAL_*` environment variables over an
//! optional configuration file. Session cookie toggles are read separately;
//! see [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    AdminCredentials, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, UserValidationError,
};

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The admin pair fails credential validation.
    #[error("invalid admin credentials: {0}")]
    Admin(#[from] UserValidationError),
}

/// Runtime settings for the portal server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Admin login e-mail.
    pub admin_email: Option<String>,
    /// Admin password.
    pub admin_password: Option<String>,
    /// Insert the default vaccines at start-up.
    #[ortho_config(default = true)]
    pub seed_defaults: bool,
}

impl PortalSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.trim().parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Admin pair, each half falling back to its default.
    pub fn admin_credentials(&self) -> Result<AdminCredentials, SettingsError> {
        let email = self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL);
        let password = self
            .admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD);
        Ok(AdminCredentials::try_new(email, password)?)
    }
}
