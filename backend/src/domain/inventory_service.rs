//! Inventory domain service: admin stock changes and start-up seeding.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{InventoryCommand, InventoryRepository, InventoryRepositoryError};
use crate::domain::{
    DEFAULT_VACCINES, Error, Identity, RestockOutcome, StockAmount, VaccineName,
    VaccineValidationError,
};

/// Implements [`InventoryCommand`] on top of an [`InventoryRepository`].
#[derive(Clone)]
pub struct InventoryService<I> {
    inventory: Arc<I>,
}

impl<I> InventoryService<I> {
    /// Create a service backed by `inventory`.
    pub fn new(inventory: Arc<I>) -> Self {
        Self { inventory }
    }
}

pub(crate) fn map_inventory_error(error: InventoryRepositoryError) -> Error {
    match error {
        InventoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("inventory repository unavailable: {message}"))
        }
        InventoryRepositoryError::Query { message } => {
            Error::internal(format!("inventory repository error: {message}"))
        }
        overflow @ InventoryRepositoryError::StockOverflow { .. } => {
            Error::invalid_request(overflow.to_string())
                .with_details(json!({ "code": "stock_overflow" }))
        }
    }
}

/// Like [`map_inventory_error`], but an overflow names `field`, the form
/// field that carried the amount.
fn map_restock_error(error: InventoryRepositoryError, field: &str) -> Error {
    match error {
        overflow @ InventoryRepositoryError::StockOverflow { .. } => {
            debug!(%overflow, "restock rejected");
            Error::invalid_request(overflow.to_string())
                .with_details(json!({ "field": field, "code": "stock_overflow" }))
        }
        other => map_inventory_error(other),
    }
}

fn log_outcome(outcome: &RestockOutcome, amount: StockAmount) {
    info!(
        vaccine = %outcome.vaccine.name,
        added = amount.value(),
        stock = outcome.vaccine.stock,
        created = outcome.created,
        requests_resolved = outcome.requests_resolved,
        "vaccine stock updated"
    );
}

#[async_trait]
impl<I> InventoryCommand for InventoryService<I>
where
    I: InventoryRepository,
{
    async fn add_or_restock(
        &self,
        identity: &Identity,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, Error> {
        identity.require_admin()?;
        let outcome = self
            .inventory
            .add_or_restock(name, amount)
            .await
            .map_err(|err| map_restock_error(err, "new_stock"))?;
        log_outcome(&outcome, amount);
        Ok(outcome)
    }

    async fn restock(
        &self,
        identity: &Identity,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, Error> {
        identity.require_admin()?;
        match self
            .inventory
            .restock(name, amount)
            .await
            .map_err(|err| map_restock_error(err, "restock_amount"))?
        {
            Some(outcome) => {
                log_outcome(&outcome, amount);
                Ok(outcome)
            }
            None => {
                debug!(vaccine = %name, "restock rejected: unknown vaccine");
                Err(Error::not_found(format!("vaccine '{name}' does not exist")))
            }
        }
    }
}

/// Insert the default vaccines unless a vaccine with the same name exists.
///
/// Returns how many vaccines were inserted.
pub async fn seed_default_vaccines<I>(inventory: &I) -> Result<usize, Error>
where
    I: InventoryRepository + ?Sized,
{
    let defaults = DEFAULT_VACCINES
        .iter()
        .map(|(name, stock)| -> Result<_, VaccineValidationError> {
            Ok((VaccineName::new(name)?, StockAmount::try_new(*stock)?))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| Error::internal(format!("invalid default vaccine: {err}")))?;
    let inserted = inventory
        .seed(&defaults)
        .await
        .map_err(map_inventory_error)?;
    info!(inserted, "default vaccines seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockInventoryRepository;
    use crate::domain::{ErrorCode, UserId, UserName, Vaccine, VaccineId};
    use rstest::rstest;

    fn admin() -> Identity {
        Identity::anonymous().with_admin()
    }

    fn name(raw: &str) -> VaccineName {
        VaccineName::new(raw).expect("vaccine name")
    }

    fn amount(value: i32) -> StockAmount {
        StockAmount::try_new(value).expect("amount")
    }

    fn outcome(stock: i32, created: bool, resolved: usize) -> RestockOutcome {
        RestockOutcome {
            vaccine: Vaccine {
                id: VaccineId::new(4),
                name: "Sputnik X".into(),
                stock,
            },
            created,
            requests_resolved: resolved,
        }
    }

    fn service(repo: MockInventoryRepository) -> InventoryService<MockInventoryRepository> {
        InventoryService::new(Arc::new(repo))
    }

    #[rstest]
    #[case(Identity::anonymous())]
    #[case(Identity::user(UserId::new(1), UserName::new("Ada").expect("name")))]
    #[tokio::test]
    async fn non_admins_cannot_change_stock(#[case] identity: Identity) {
        let mut repo = MockInventoryRepository::new();
        repo.expect_add_or_restock().never();
        repo.expect_restock().never();
        let service = service(repo);

        let err = service
            .add_or_restock(&identity, &name("Covaxin"), amount(3))
            .await
            .expect_err("admin required");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        let err = service
            .restock(&identity, &name("Covaxin"), amount(3))
            .await
            .expect_err("admin required");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn add_or_restock_passes_name_and_amount_through() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_add_or_restock()
            .withf(|n, a| n.key() == "sputnik x" && a.value() == 5)
            .times(1)
            .return_once(|_, _| Ok(outcome(5, true, 1)));

        let result = service(repo)
            .add_or_restock(&admin(), &name(" Sputnik  X"), amount(5))
            .await
            .expect("stock added");
        assert!(result.created);
        assert_eq!(result.requests_resolved, 1);
    }

    #[tokio::test]
    async fn restock_of_unknown_vaccine_is_not_found() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_restock().times(1).return_once(|_, _| Ok(None));

        let err = service(repo)
            .restock(&admin(), &name("Nonexistent"), amount(1))
            .await
            .expect_err("unknown vaccine");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn restock_maps_connection_failures() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_restock()
            .times(1)
            .return_once(|_, _| Err(InventoryRepositoryError::connection("pool exhausted")));

        let err = service(repo)
            .restock(&admin(), &name("Covaxin"), amount(1))
            .await
            .expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case(true, "new_stock")]
    #[case(false, "restock_amount")]
    #[tokio::test]
    async fn overflowing_stock_is_an_invalid_amount(#[case] upsert: bool, #[case] field: &str) {
        let overflow = || InventoryRepositoryError::stock_overflow("Covaxin", 10, i32::MAX);
        let mut repo = MockInventoryRepository::new();
        repo.expect_add_or_restock()
            .returning(move |_, _| Err(overflow()));
        repo.expect_restock().returning(move |_, _| Err(overflow()));
        let service = service(repo);

        let result = if upsert {
            service
                .add_or_restock(&admin(), &name("Covaxin"), amount(i32::MAX))
                .await
        } else {
            service
                .restock(&admin(), &name("Covaxin"), amount(i32::MAX))
                .await
        };
        let err = result.expect_err("overflow rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({ "field": field, "code": "stock_overflow" }))
        );
    }

    #[tokio::test]
    async fn seeding_offers_the_three_defaults() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_seed()
            .withf(|defaults| {
                let shape: Vec<_> = defaults
                    .iter()
                    .map(|(n, a)| (n.as_ref().to_owned(), a.value()))
                    .collect();
                shape
                    == vec![
                        ("Covishield".to_owned(), 10),
                        ("Covaxin".to_owned(), 10),
                        ("Sputnik V".to_owned(), 5),
                    ]
            })
            .times(1)
            .return_once(|_| Ok(3));

        assert_eq!(seed_default_vaccines(&repo).await.expect("seeded"), 3);
    }
}
