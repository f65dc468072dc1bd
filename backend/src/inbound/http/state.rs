//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::AdminCredentials;
use crate::domain::ports::{AccountCommand, BookingCommand, DashboardQuery, InventoryCommand};

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub inventory: Arc<dyn InventoryCommand>,
    pub bookings: Arc<dyn BookingCommand>,
    pub dashboards: Arc<dyn DashboardQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub inventory: Arc<dyn InventoryCommand>,
    pub bookings: Arc<dyn BookingCommand>,
    pub dashboards: Arc<dyn DashboardQuery>,
    /// The single admin credential pair.
    pub admin: Arc<AdminCredentials>,
}

impl HttpState {
    /// Combine the driving ports with the configured admin pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use vaccine_portal::domain::{
    ///     AccountService, AdminCredentials, BookingService, DashboardService, InventoryService,
    /// };
    /// use vaccine_portal::inbound::http::state::{HttpState, HttpStatePorts};
    /// use vaccine_portal::outbound::memory::InMemoryPortal;
    ///
    /// let store = Arc::new(InMemoryPortal::default());
    /// let ports = HttpStatePorts {
    ///     accounts: Arc::new(AccountService::new(store.clone())),
    ///     inventory: Arc::new(InventoryService::new(store.clone())),
    ///     bookings: Arc::new(BookingService::new(store.clone(), store.clone())),
    ///     dashboards: Arc::new(DashboardService::new(store.clone(), store.clone(), store)),
    /// };
    /// let state = HttpState::new(ports, AdminCredentials::default());
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, admin: AdminCredentials) -> Self {
        let HttpStatePorts {
            accounts,
            inventory,
            bookings,
            dashboards,
        } = ports;
        Self {
            accounts,
            inventory,
            bookings,
            dashboards,
            admin: Arc::new(admin),
        }
    }
}
