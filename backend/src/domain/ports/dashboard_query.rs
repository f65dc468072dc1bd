//! Driving port for dashboard reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AdminBookingView, AdminRequestView, Booking, Error, Identity, Vaccine, VaccineRequest,
};

/// Data shown to a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    /// Name captured when the session was established.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    pub vaccines: Vec<Vaccine>,
    pub bookings: Vec<Booking>,
    pub requests: Vec<VaccineRequest>,
}

/// Data shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub bookings: Vec<AdminBookingView>,
    pub vaccines: Vec<Vaccine>,
    pub requests: Vec<AdminRequestView>,
}

/// Dashboard reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Stock list plus the caller's own bookings and requests.
    async fn user_dashboard(&self, identity: &Identity) -> Result<UserDashboard, Error>;

    /// Purge `done` bookings, then gather every booking, vaccine and request.
    async fn admin_dashboard(&self, identity: &Identity) -> Result<AdminDashboard, Error>;
}
