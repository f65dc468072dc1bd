//! Driven port for vaccine stock.
//!
//! Both restock operations must run as one unit with the request
//! synchronisation: the stock change and the `pending -> available now`
//! update commit together or not at all.

use async_trait::async_trait;

use crate::domain::{RestockOutcome, StockAmount, Vaccine, VaccineName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by inventory adapters.
    pub enum InventoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "inventory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "inventory repository query failed: {message}",
        /// Adding `amount` would push the stock past the column's range.
        StockOverflow { vaccine: String, stock: i32, amount: i32 } =>
            "adding {amount} doses to '{vaccine}' (stock {stock}) exceeds the stock limit",
    }
}

/// Vaccine catalogue and stock counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// All vaccines ordered by id.
    async fn list_vaccines(&self) -> Result<Vec<Vaccine>, InventoryRepositoryError>;

    /// Insert each vaccine unless one with the same name exists; returns the
    /// number inserted.
    async fn seed(
        &self,
        defaults: &[(VaccineName, StockAmount)],
    ) -> Result<usize, InventoryRepositoryError>;

    /// Create the vaccine with `amount` doses or add `amount` to its stock,
    /// then resolve pending requests for the same name.
    async fn add_or_restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, InventoryRepositoryError>;

    /// Add `amount` to an existing vaccine and resolve pending requests.
    /// Returns `None` without writing anything when the vaccine is unknown.
    async fn restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<Option<RestockOutcome>, InventoryRepositoryError>;
}
