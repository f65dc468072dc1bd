//! PostgreSQL-backed `VaccineRequestRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VaccineRequestRepository, VaccineRequestRepositoryError};
use crate::domain::{
    AdminRequestView, RequestId, RequestStatus, UserId, VaccineName, VaccineRequest,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AdminRequestRow, NewRequestRow, RequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{requests, users};

/// Diesel implementation of [`VaccineRequestRepository`].
#[derive(Clone)]
pub struct DieselVaccineRequestRepository {
    pool: DbPool,
}

impl DieselVaccineRequestRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VaccineRequestRepositoryError {
    map_basic_pool_error(error, VaccineRequestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VaccineRequestRepositoryError {
    map_basic_diesel_error(
        error,
        VaccineRequestRepositoryError::query,
        VaccineRequestRepositoryError::connection,
    )
}

fn parse_status(raw: &str) -> Result<RequestStatus, VaccineRequestRepositoryError> {
    raw.parse().map_err(|err| {
        VaccineRequestRepositoryError::query(format!("invalid stored request: {err}"))
    })
}

fn row_to_request(row: RequestRow) -> Result<VaccineRequest, VaccineRequestRepositoryError> {
    Ok(VaccineRequest {
        id: RequestId::new(row.id),
        user_id: UserId::new(row.user_id),
        status: parse_status(&row.status)?,
        vaccine_name: row.vaccine_name,
    })
}

#[async_trait]
impl VaccineRequestRepository for DieselVaccineRequestRepository {
    async fn create(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
    ) -> Result<VaccineRequest, VaccineRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(requests::table)
            .values(&NewRequestRow {
                user_id: user_id.value(),
                vaccine_name: vaccine.as_ref(),
                vaccine_key: vaccine.key(),
                status: RequestStatus::Pending.as_str(),
            })
            .returning(RequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_request(row)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VaccineRequest>, VaccineRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RequestRow> = requests::table
            .filter(requests::user_id.eq(user_id.value()))
            .select(RequestRow::as_select())
            .order(requests::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_request).collect()
    }

    async fn list_all(&self) -> Result<Vec<AdminRequestView>, VaccineRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AdminRequestRow> = requests::table
            .inner_join(users::table)
            .select((
                requests::id,
                users::name,
                requests::vaccine_name,
                requests::status,
            ))
            .order(requests::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| {
                Ok(AdminRequestView {
                    id: RequestId::new(row.id),
                    status: parse_status(&row.status)?,
                    user_name: row.user_name,
                    vaccine_name: row.vaccine_name,
                })
            })
            .collect()
    }

    async fn delete(&self, id: RequestId) -> Result<bool, VaccineRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(requests::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
