//! PostgreSQL-backed `BookingRepository`.
//!
//! `book_if_available` takes the dose with a conditional decrement
//! (`stock = stock - 1 WHERE stock > 0`) and inserts the booking in the same
//! transaction. Concurrent bookings of the last dose serialise on the vaccine
//! row lock; the loser's `WHERE` no longer matches and nothing is written.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    AdminBookingView, Booking, BookingDate, BookingId, BookingStatus, UserId, VaccineName,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AdminBookingRow, BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, users, vaccines};

/// Diesel implementation of [`BookingRepository`].
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn parse_status(raw: &str) -> Result<BookingStatus, BookingRepositoryError> {
    raw.parse()
        .map_err(|err| BookingRepositoryError::query(format!("invalid stored booking: {err}")))
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    Ok(Booking {
        id: BookingId::new(row.id),
        user_id: UserId::new(row.user_id),
        status: parse_status(&row.status)?,
        vaccine: row.vaccine,
        date: row.date,
    })
}

fn row_to_admin_view(row: AdminBookingRow) -> Result<AdminBookingView, BookingRepositoryError> {
    Ok(AdminBookingView {
        id: BookingId::new(row.id),
        status: parse_status(&row.status)?,
        user_name: row.user_name,
        user_email: row.user_email,
        vaccine: row.vaccine,
        date: row.date,
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn book_if_available(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
        date: BookingDate,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let date = date.to_string();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    let taken: Option<String> = diesel::update(
                        vaccines::table
                            .filter(vaccines::name_key.eq(vaccine.key()))
                            .filter(vaccines::stock.gt(0)),
                    )
                    .set(vaccines::stock.eq(vaccines::stock - 1))
                    .returning(vaccines::name)
                    .get_result(conn)
                    .await
                    .optional()?;
                    let Some(vaccine_name) = taken else {
                        return Ok(None);
                    };

                    let row = diesel::insert_into(bookings::table)
                        .values(&NewBookingRow {
                            user_id: user_id.value(),
                            vaccine: &vaccine_name,
                            date: &date,
                            status: BookingStatus::Pending.as_str(),
                        })
                        .returning(BookingRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_booking).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user_id.value()))
            .select(BookingRow::as_select())
            .order(bookings::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<AdminBookingView>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AdminBookingRow> = bookings::table
            .inner_join(users::table)
            .select((
                bookings::id,
                users::name,
                users::email,
                bookings::vaccine,
                bookings::date,
                bookings::status,
            ))
            .order(bookings::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_admin_view).collect()
    }

    async fn mark_done(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(bookings::table.find(id.value()))
            .set(bookings::status.eq(BookingStatus::Done.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(bookings::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn purge_done(&self) -> Result<usize, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(bookings::table.filter(bookings::status.eq(BookingStatus::Done.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
