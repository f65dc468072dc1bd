//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use vaccine_portal::domain::AdminCredentials;
use vaccine_portal::outbound::memory::InMemoryPortal;
use vaccine_portal::outbound::persistence::DbPool;

/// Where portal data lives.
#[derive(Clone)]
pub enum StoreBackend {
    /// PostgreSQL through the shared pool.
    Postgres(DbPool),
    /// Process-local store; contents vanish on restart.
    Memory(Arc<InMemoryPortal>),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin: AdminCredentials,
    pub(crate) store: StoreBackend,
}

impl ServerConfig {
    /// Configuration backed by a fresh in-memory store and the default
    /// admin pair.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            admin: AdminCredentials::default(),
            store: StoreBackend::Memory(Arc::new(InMemoryPortal::new())),
        }
    }

    /// Use PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.store = StoreBackend::Postgres(pool);
        self
    }

    /// Replace the admin credential pair.
    #[must_use]
    pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = admin;
        self
    }

    /// Selected store.
    pub fn store(&self) -> &StoreBackend {
        &self.store
    }
}
