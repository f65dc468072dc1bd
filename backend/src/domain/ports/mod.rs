//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod booking_command;
mod booking_repository;
mod dashboard_query;
mod inventory_command;
mod inventory_repository;
mod user_repository;
mod vaccine_request_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{AdminDashboard, DashboardQuery, UserDashboard};
#[cfg(test)]
pub use inventory_command::MockInventoryCommand;
pub use inventory_command::InventoryCommand;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{InventoryRepository, InventoryRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vaccine_request_repository::MockVaccineRequestRepository;
pub use vaccine_request_repository::{VaccineRequestRepository, VaccineRequestRepositoryError};
