//! Driven port for vaccine requests.

use async_trait::async_trait;

use crate::domain::{AdminRequestView, RequestId, UserId, VaccineName, VaccineRequest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by request adapters.
    pub enum VaccineRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "request repository query failed: {message}",
    }
}

/// Request rows. Duplicates per user and vaccine are allowed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaccineRequestRepository: Send + Sync {
    /// Record a pending request.
    async fn create(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
    ) -> Result<VaccineRequest, VaccineRequestRepositoryError>;

    /// Requests filed by `user_id`, oldest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VaccineRequest>, VaccineRequestRepositoryError>;

    /// Every request joined with its owner's name, oldest first.
    async fn list_all(&self) -> Result<Vec<AdminRequestView>, VaccineRequestRepositoryError>;

    /// Delete the request; returns whether a row matched.
    async fn delete(&self, id: RequestId) -> Result<bool, VaccineRequestRepositoryError>;
}
