//! Driving port for admin inventory changes.

use async_trait::async_trait;

use crate::domain::{Error, Identity, RestockOutcome, StockAmount, VaccineName};

/// Admin-only stock mutations.
///
/// Both operations resolve pending requests whose vaccine name matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryCommand: Send + Sync {
    /// Create the vaccine with `amount` doses, or add `amount` when it exists.
    async fn add_or_restock(
        &self,
        identity: &Identity,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, Error>;

    /// Add `amount` doses to an existing vaccine.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no vaccine has this name.
    async fn restock(
        &self,
        identity: &Identity,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, Error>;
}
