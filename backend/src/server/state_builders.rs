//! Builders wiring driven adapters into services and HTTP state.

use std::sync::Arc;

use vaccine_portal::domain::ports::{
    BookingRepository, InventoryRepository, UserRepository, VaccineRequestRepository,
};
use vaccine_portal::domain::{
    AccountService, AdminCredentials, BookingService, DashboardService, Error, InventoryService,
    seed_default_vaccines,
};
use vaccine_portal::inbound::http::state::{HttpState, HttpStatePorts};
use vaccine_portal::outbound::persistence::{
    DieselBookingRepository, DieselInventoryRepository, DieselUserRepository,
    DieselVaccineRequestRepository,
};

use super::config::StoreBackend;

/// Driven adapters for every repository port.
struct Repositories<U, I, B, R> {
    users: Arc<U>,
    inventory: Arc<I>,
    bookings: Arc<B>,
    requests: Arc<R>,
}

impl<U, I, B, R> Repositories<U, I, B, R>
where
    U: UserRepository + 'static,
    I: InventoryRepository + 'static,
    B: BookingRepository + 'static,
    R: VaccineRequestRepository + 'static,
{
    fn into_state(self, admin: AdminCredentials) -> HttpState {
        let Self {
            users,
            inventory,
            bookings,
            requests,
        } = self;
        let ports = HttpStatePorts {
            accounts: Arc::new(AccountService::new(users)),
            inventory: Arc::new(InventoryService::new(inventory.clone())),
            bookings: Arc::new(BookingService::new(bookings.clone(), requests.clone())),
            dashboards: Arc::new(DashboardService::new(inventory, bookings, requests)),
        };
        HttpState::new(ports, admin)
    }
}

/// Build handler state for the selected store.
pub(crate) fn build_http_state(store: &StoreBackend, admin: AdminCredentials) -> HttpState {
    match store {
        StoreBackend::Postgres(pool) => Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            inventory: Arc::new(DieselInventoryRepository::new(pool.clone())),
            bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
            requests: Arc::new(DieselVaccineRequestRepository::new(pool.clone())),
        }
        .into_state(admin),
        StoreBackend::Memory(store) => Repositories {
            users: Arc::clone(store),
            inventory: Arc::clone(store),
            bookings: Arc::clone(store),
            requests: Arc::clone(store),
        }
        .into_state(admin),
    }
}

/// Insert the default vaccines into the selected store.
pub(crate) async fn seed_store(store: &StoreBackend) -> Result<usize, Error> {
    match store {
        StoreBackend::Postgres(pool) => {
            seed_default_vaccines(&DieselInventoryRepository::new(pool.clone())).await
        }
        StoreBackend::Memory(store) => seed_default_vaccines(store.as_ref()).await,
    }
}
