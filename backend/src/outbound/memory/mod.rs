//! Process-local store implementing every driven port.
//!
//! All four collections sit behind one mutex, so each port call is atomic
//! with respect to every other call. That gives the booking and restock
//! sequences the same all-or-nothing behaviour as the PostgreSQL adapters.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, InventoryRepository, InventoryRepositoryError,
    UserPersistenceError, UserRepository, VaccineRequestRepository,
    VaccineRequestRepositoryError,
};
use crate::domain::{
    AdminBookingView, AdminRequestView, Booking, BookingDate, BookingId, BookingStatus, Email,
    LoginCredentials, Registration, RequestId, RequestStatus, RestockOutcome, StockAmount, User,
    UserId, UserName, Vaccine, VaccineId, VaccineName, VaccineRequest,
};

#[derive(Debug, Clone)]
struct StoredUser {
    id: i32,
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredVaccine {
    id: i32,
    name: String,
    name_key: String,
    stock: i32,
}

#[derive(Debug, Clone)]
struct StoredBooking {
    id: i32,
    user_id: i32,
    vaccine: String,
    date: String,
    status: BookingStatus,
}

#[derive(Debug, Clone)]
struct StoredRequest {
    id: i32,
    user_id: i32,
    vaccine_name: String,
    vaccine_key: String,
    status: RequestStatus,
}

#[derive(Debug, Default)]
struct PortalState {
    users: Vec<StoredUser>,
    vaccines: Vec<StoredVaccine>,
    bookings: Vec<StoredBooking>,
    requests: Vec<StoredRequest>,
    last_user_id: i32,
    last_vaccine_id: i32,
    last_booking_id: i32,
    last_request_id: i32,
}

impl PortalState {
    fn vaccine_mut(&mut self, key: &str) -> Option<&mut StoredVaccine> {
        self.vaccines.iter_mut().find(|v| v.name_key == key)
    }

    fn insert_vaccine(&mut self, name: &VaccineName, stock: i32) {
        self.last_vaccine_id += 1;
        self.vaccines.push(StoredVaccine {
            id: self.last_vaccine_id,
            name: name.to_string(),
            name_key: name.key().to_owned(),
            stock,
        });
    }

    fn resolve_requests(&mut self, key: &str) -> usize {
        let mut resolved = 0;
        for request in self
            .requests
            .iter_mut()
            .filter(|r| r.vaccine_key == key && r.status == RequestStatus::Pending)
        {
            request.status = RequestStatus::AvailableNow;
            resolved += 1;
        }
        resolved
    }

    fn add_stock(
        &mut self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<Option<Vaccine>, InventoryRepositoryError> {
        let Some(vaccine) = self.vaccine_mut(name.key()) else {
            return Ok(None);
        };
        vaccine.stock = vaccine.stock.checked_add(amount.value()).ok_or_else(|| {
            InventoryRepositoryError::stock_overflow(
                vaccine.name.as_str(),
                vaccine.stock,
                amount.value(),
            )
        })?;
        Ok(Some(to_vaccine(vaccine)))
    }

    fn user(&self, id: i32) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.id == id)
    }
}

fn to_vaccine(row: &StoredVaccine) -> Vaccine {
    Vaccine {
        id: VaccineId::new(row.id),
        name: row.name.clone(),
        stock: row.stock,
    }
}

fn to_user(row: &StoredUser) -> Result<User, String> {
    let name = UserName::new(&row.name).map_err(|err| err.to_string())?;
    let email = Email::new(&row.email).map_err(|err| err.to_string())?;
    Ok(User::new(UserId::new(row.id), name, email))
}

fn to_booking(row: &StoredBooking) -> Booking {
    Booking {
        id: BookingId::new(row.id),
        user_id: UserId::new(row.user_id),
        vaccine: row.vaccine.clone(),
        date: row.date.clone(),
        status: row.status,
    }
}

fn to_request(row: &StoredRequest) -> VaccineRequest {
    VaccineRequest {
        id: RequestId::new(row.id),
        user_id: UserId::new(row.user_id),
        vaccine_name: row.vaccine_name.clone(),
        status: row.status,
    }
}

/// In-memory implementation of the user, inventory, booking and request
/// repositories.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use vaccine_portal::outbound::memory::InMemoryPortal;
///
/// let store = Arc::new(InMemoryPortal::new());
/// let _same = Arc::clone(&store);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPortal {
    state: Mutex<PortalState>,
}

impl InMemoryPortal {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, PortalState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryPortal {
    async fn create(&self, registration: &Registration) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let email = registration.email().as_ref();
        if state.users.iter().any(|u| u.email == email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }
        state.last_user_id += 1;
        let row = StoredUser {
            id: state.last_user_id,
            name: registration.name().to_string(),
            email: email.to_owned(),
            password: registration.password().to_owned(),
        };
        let user = to_user(&row).map_err(UserPersistenceError::query)?;
        state.users.push(row);
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        state
            .users
            .iter()
            .find(|u| u.email == credentials.email().as_ref() && u.password == credentials.password())
            .map(to_user)
            .transpose()
            .map_err(UserPersistenceError::query)
    }
}

#[async_trait]
impl InventoryRepository for InMemoryPortal {
    async fn list_vaccines(&self) -> Result<Vec<Vaccine>, InventoryRepositoryError> {
        let state = self.lock().map_err(InventoryRepositoryError::query)?;
        Ok(state.vaccines.iter().map(to_vaccine).collect())
    }

    async fn seed(
        &self,
        defaults: &[(VaccineName, StockAmount)],
    ) -> Result<usize, InventoryRepositoryError> {
        let mut state = self.lock().map_err(InventoryRepositoryError::query)?;
        let mut inserted = 0;
        for (name, stock) in defaults {
            if state.vaccine_mut(name.key()).is_none() {
                state.insert_vaccine(name, stock.value());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn add_or_restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<RestockOutcome, InventoryRepositoryError> {
        let mut state = self.lock().map_err(InventoryRepositoryError::query)?;
        let created = state.vaccine_mut(name.key()).is_none();
        if created {
            state.insert_vaccine(name, 0);
        }
        let vaccine = state
            .add_stock(name, amount)?
            .ok_or_else(|| InventoryRepositoryError::query("vaccine vanished during restock"))?;
        let requests_resolved = state.resolve_requests(name.key());
        Ok(RestockOutcome {
            vaccine,
            created,
            requests_resolved,
        })
    }

    async fn restock(
        &self,
        name: &VaccineName,
        amount: StockAmount,
    ) -> Result<Option<RestockOutcome>, InventoryRepositoryError> {
        let mut state = self.lock().map_err(InventoryRepositoryError::query)?;
        let Some(vaccine) = state.add_stock(name, amount)? else {
            return Ok(None);
        };
        let requests_resolved = state.resolve_requests(name.key());
        Ok(Some(RestockOutcome {
            vaccine,
            created: false,
            requests_resolved,
        }))
    }
}

#[async_trait]
impl BookingRepository for InMemoryPortal {
    async fn book_if_available(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
        date: BookingDate,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut state = self.lock().map_err(BookingRepositoryError::query)?;
        let Some(stored) = state.vaccine_mut(vaccine.key()) else {
            return Ok(None);
        };
        if stored.stock <= 0 {
            return Ok(None);
        }
        stored.stock -= 1;
        let vaccine_name = stored.name.clone();
        state.last_booking_id += 1;
        let row = StoredBooking {
            id: state.last_booking_id,
            user_id: user_id.value(),
            vaccine: vaccine_name,
            date: date.to_string(),
            status: BookingStatus::Pending,
        };
        let booking = to_booking(&row);
        state.bookings.push(row);
        Ok(Some(booking))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let state = self.lock().map_err(BookingRepositoryError::query)?;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id.value())
            .map(to_booking)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<AdminBookingView>, BookingRepositoryError> {
        let state = self.lock().map_err(BookingRepositoryError::query)?;
        Ok(state
            .bookings
            .iter()
            .filter_map(|b| {
                state.user(b.user_id).map(|user| AdminBookingView {
                    id: BookingId::new(b.id),
                    user_name: user.name.clone(),
                    user_email: user.email.clone(),
                    vaccine: b.vaccine.clone(),
                    date: b.date.clone(),
                    status: b.status,
                })
            })
            .collect())
    }

    async fn mark_done(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut state = self.lock().map_err(BookingRepositoryError::query)?;
        match state.bookings.iter_mut().find(|b| b.id == id.value()) {
            Some(booking) => {
                booking.status = BookingStatus::Done;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut state = self.lock().map_err(BookingRepositoryError::query)?;
        let before = state.bookings.len();
        state.bookings.retain(|b| b.id != id.value());
        Ok(state.bookings.len() < before)
    }

    async fn purge_done(&self) -> Result<usize, BookingRepositoryError> {
        let mut state = self.lock().map_err(BookingRepositoryError::query)?;
        let before = state.bookings.len();
        state.bookings.retain(|b| b.status != BookingStatus::Done);
        Ok(before - state.bookings.len())
    }
}

#[async_trait]
impl VaccineRequestRepository for InMemoryPortal {
    async fn create(
        &self,
        user_id: UserId,
        vaccine: &VaccineName,
    ) -> Result<VaccineRequest, VaccineRequestRepositoryError> {
        let mut state = self.lock().map_err(VaccineRequestRepositoryError::query)?;
        state.last_request_id += 1;
        let row = StoredRequest {
            id: state.last_request_id,
            user_id: user_id.value(),
            vaccine_name: vaccine.to_string(),
            vaccine_key: vaccine.key().to_owned(),
            status: RequestStatus::Pending,
        };
        let request = to_request(&row);
        state.requests.push(row);
        Ok(request)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VaccineRequest>, VaccineRequestRepositoryError> {
        let state = self.lock().map_err(VaccineRequestRepositoryError::query)?;
        Ok(state
            .requests
            .iter()
            .filter(|r| r.user_id == user_id.value())
            .map(to_request)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<AdminRequestView>, VaccineRequestRepositoryError> {
        let state = self.lock().map_err(VaccineRequestRepositoryError::query)?;
        Ok(state
            .requests
            .iter()
            .filter_map(|r| {
                state.user(r.user_id).map(|user| AdminRequestView {
                    id: RequestId::new(r.id),
                    user_name: user.name.clone(),
                    vaccine_name: r.vaccine_name.clone(),
                    status: r.status,
                })
            })
            .collect())
    }

    async fn delete(&self, id: RequestId) -> Result<bool, VaccineRequestRepositoryError> {
        let mut state = self.lock().map_err(VaccineRequestRepositoryError::query)?;
        let before = state.requests.len();
        state.requests.retain(|r| r.id != id.value());
        Ok(state.requests.len() < before)
    }
}
