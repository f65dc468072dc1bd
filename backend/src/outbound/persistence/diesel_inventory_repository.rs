//! PostgreSQL-backed `InventoryRepository`.
//!
//! Restocks run in one transaction: upsert the vaccine, lock its row, add the
//! amount, and flip matching pending requests to `available now`. An amount
//! that would overflow the stock column is rejected before any write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{InventoryRepository, InventoryRepositoryError};
use crate::domain::{RequestStatus, RestockOutcome, StockAmount, Vaccine, VaccineId, VaccineName};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVaccineRow, VaccineRow};
use super::pool::{DbPool, PoolError};
use super::schema::{requests, vaccines};

/// Diesel implementation of [`InventoryRepository`].
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InventoryRepositoryError {
    map_basic_pool_error(error, InventoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InventoryRepositoryError {
    map_basic_diesel_error(
        error,
        InventoryRepositoryError::query,
        InventoryRepositoryError::connection,
    )
}

fn row_to_vaccine(row: VaccineRow) -> Vaccine {
    Vaccine {
        id: VaccineId::new(row.id),
        name: row.name,
        stock: row.stock,
    }
}

/// Failures inside a restock transaction.
#[derive(Debug)]
enum RestockError {
    Diesel(diesel::result::Error),
    Overflow { vaccine: String, stock: i32 },
}

impl From<diesel::result::Error> for RestockError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_restock_error(error: RestockError, amount: StockAmount) -> InventoryRepositoryError {
    match error {
        RestockError::Diesel(err) => map_diesel_error(err),
        RestockError::Overflow { vaccine, stock } => {
            InventoryRepositoryError::stock_overflow(vaccine, stock, amount.value())
        }
    }
}

/// Add `amount` to the vaccine keyed `name_key`; `None` when absent.
async fn add_stock(
    conn: &mut AsyncPgConnection,
    name_key: &str,
    amount: StockAmount,
) -> Result<Option<VaccineRow>, RestockError> {
    let current: Option<VaccineRow> = vaccines::table
        .filter(vaccines::name_key.eq(name_key))
        .select(VaccineRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?;
    let Some(current) = current else {
        return Ok(None);
    };
    let Some(stock) = current.stock.checked_add(amount.value()) else {
        return Err(RestockError::Overflow {
            vaccine: current.name,
            stock: current.stock,
        });
    };
    let row = diesel::update(vaccines::table.filter(vaccines::id.eq(current.id)))
        .set(vaccines::stock.eq(stock))
        .returning(VaccineRow::as_returning())
        .get_result(conn)
        .await?;
    Ok(Some(row))
}

async fn resolve_pending_requests(
    conn: &mut AsyncPgConnection,
    vaccine_key: &str,
) -> QueryResult<usize> {
    diesel::update(
        requests::table
            .filter(requests::vaccine_key.eq(vaccine_key))
            .filter(requests::status.eq(RequestStatus::Pending.as_str())),
    )
    .set(requests::status.eq(RequestStatus::AvailableNow.as_str()))
    .execute(conn)
    .await
}

#[async_trait]
impl InventoryRepository for DieselInventoryRepository {
    async fn list_vaccines(&self) -> Result<Vec<Vaccine>, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VaccineRow> = vaccines::table
            .select(VaccineRow::as_select())
            .order(vaccines::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_vaccine).collect())
    }

    async fn seed(
        &self,
        defaults: &[(VaccineName, StockAmount)],
    ) -> Result<usize, InventoryRepositoryError> {
        let rows: Vec<NewVaccineRow<'_>> = defaults
            .iter()
            .map(|(name, stock)| NewVaccineRow {
                name: name.as_ref(),
                name_key: name.key(),
                stock: stock.value(),
            })
            .collect();
        if rows.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(vaccines::table)
            .values(&rows)
            .on_conflict(vaccines::name_key)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn add_or_restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (row, created, requests_resolved) = conn
            .transaction::<_, RestockError, _>(|conn| {
                async move {
                    let inserted = diesel::insert_into(vaccines::table)
                        .values(&NewVaccineRow {
                            name: name.as_ref(),
                            name_key: name.key(),
                            stock: 0,
                        })
                        .on_conflict(vaccines::name_key)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    let row = add_stock(conn, name.key(), amount)
                        .await?
                        .ok_or(diesel::result::Error::NotFound)?;
                    let resolved = resolve_pending_requests(conn, name.key()).await?;
                    Ok((row, inserted == 1, resolved))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_restock_error(err, amount))?;

        Ok(RestockOutcome {
            vaccine: row_to_vaccine(row),
            created,
            requests_resolved,
        })
    }

    async fn restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<Option<RestockOutcome>, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction::<_, RestockError, _>(|conn| {
                async move {
                    let Some(row) = add_stock(conn, name.key(), amount).await? else {
                        return Ok(None);
                    };
                    let resolved = resolve_pending_requests(conn, name.key()).await?;
                    Ok(Some((row, resolved)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_restock_error(err, amount))?;

        Ok(outcome.map(|(row, requests_resolved)| RestockOutcome {
            vaccine: row_to_vaccine(row),
            created: false,
            requests_resolved,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn overflow_keeps_vaccine_stock_and_amount() {
        let amount = StockAmount::try_new(i32::MAX).expect("amount");
        let err = map_restock_error(
            RestockError::Overflow {
                vaccine: "Covaxin".into(),
                stock: 10,
            },
            amount,
        );
        assert_eq!(
            err,
            InventoryRepositoryError::stock_overflow("Covaxin", 10, i32::MAX)
        );
    }

    #[rstest]
    fn diesel_failures_use_the_shared_mapping() {
        let amount = StockAmount::try_new(1).expect("amount");
        let err = map_restock_error(RestockError::Diesel(diesel::result::Error::NotFound), amount);
        assert!(matches!(err, InventoryRepositoryError::Query { .. }));
    }
}
