//! Dashboard read service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::booking_service::{map_booking_error, map_request_error};
use crate::domain::inventory_service::map_inventory_error;
use crate::domain::ports::{
    AdminDashboard, BookingRepository, DashboardQuery, InventoryRepository, UserDashboard,
    VaccineRequestRepository,
};
use crate::domain::{Error, Identity};

/// Implements [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<I, B, R> {
    inventory: Arc<I>,
    bookings: Arc<B>,
    requests: Arc<R>,
}

impl<I, B, R> DashboardService<I, B, R> {
    /// Create a service reading from the three repositories.
    pub fn new(inventory: Arc<I>, bookings: Arc<B>, requests: Arc<R>) -> Self {
        Self {
            inventory,
            bookings,
            requests,
        }
    }
}

#[async_trait]
impl<I, B, R> DashboardQuery for DashboardService<I, B, R>
where
    I: InventoryRepository,
    B: BookingRepository,
    R: VaccineRequestRepository,
{
    async fn user_dashboard(&self, identity: &Identity) -> Result<UserDashboard, Error> {
        let user = identity.require_user()?;
        let vaccines = self
            .inventory
            .list_vaccines()
            .await
            .map_err(map_inventory_error)?;
        let bookings = self
            .bookings
            .list_for_user(user.id)
            .await
            .map_err(map_booking_error)?;
        let requests = self
            .requests
            .list_for_user(user.id)
            .await
            .map_err(map_request_error)?;
        Ok(UserDashboard {
            name: user.name.to_string(),
            vaccines,
            bookings,
            requests,
        })
    }

    async fn admin_dashboard(&self, identity: &Identity) -> Result<AdminDashboard, Error> {
        identity.require_admin()?;
        // Completed bookings are shown once, then dropped on the next load.
        let purged = self
            .bookings
            .purge_done()
            .await
            .map_err(map_booking_error)?;
        if purged > 0 {
            debug!(purged, "completed bookings purged");
        }
        let bookings = self
            .bookings
            .list_all()
            .await
            .map_err(map_booking_error)?;
        let vaccines = self
            .inventory
            .list_vaccines()
            .await
            .map_err(map_inventory_error)?;
        let requests = self
            .requests
            .list_all()
            .await
            .map_err(map_request_error)?;
        Ok(AdminDashboard {
            bookings,
            vaccines,
            requests,
        })
    }
}
