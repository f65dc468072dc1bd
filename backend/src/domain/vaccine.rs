//! Vaccine inventory values.
//!
//! Bookings and requests refer to vaccines by name rather than by id. Every
//! comparison goes through [`VaccineName::key`] so stray whitespace or casing
//! in a form submission cannot desynchronise stock and pending requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length accepted for a vaccine name.
pub const VACCINE_NAME_MAX: usize = 100;

/// Vaccines inserted when the store is first initialised.
pub const DEFAULT_VACCINES: [(&str, i32); 3] =
    [("Covishield", 10), ("Covaxin", 10), ("Sputnik V", 5)];

/// Validation errors for inventory inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaccineValidationError {
    /// The vaccine name was blank.
    #[error("vaccine name must not be empty")]
    EmptyName,
    /// The vaccine name exceeded [`VACCINE_NAME_MAX`] characters.
    #[error("vaccine name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// The stock amount was blank.
    #[error("stock amount must not be empty")]
    EmptyAmount,
    /// The stock amount was not a whole number.
    #[error("stock amount must be a whole number, got '{value}'")]
    NotANumber { value: String },
    /// The stock amount was negative.
    #[error("stock amount must not be negative")]
    NegativeAmount,
    /// The stock amount does not fit the stock column.
    #[error("stock amount must be at most {max}")]
    AmountTooLarge { max: i32 },
}

impl VaccineValidationError {
    /// Machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_vaccine_name",
            Self::NameTooLong { .. } => "vaccine_name_too_long",
            Self::EmptyAmount => "empty_amount",
            Self::NotANumber { .. } => "amount_not_a_number",
            Self::NegativeAmount => "negative_amount",
            Self::AmountTooLarge { .. } => "amount_too_large",
        }
    }
}

/// Auto-incremented vaccine identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaccineId(i32);

impl VaccineId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Vaccine name as entered, paired with its matching key.
///
/// ## Invariants
/// - The display form is trimmed and non-empty.
/// - The key collapses internal whitespace runs and ASCII-lowercases.
///
/// # Examples
/// ```
/// use vaccine_portal::domain::VaccineName;
///
/// let a = VaccineName::new(" Sputnik  V ").unwrap();
/// let b = VaccineName::new("sputnik v").unwrap();
/// assert_eq!(a.as_ref(), "Sputnik  V");
/// assert_eq!(a.key(), b.key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VaccineName {
    display: String,
    key: String,
}

impl VaccineName {
    /// Validate a submitted name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, VaccineValidationError> {
        let display = name.as_ref().trim();
        if display.is_empty() {
            return Err(VaccineValidationError::EmptyName);
        }
        if display.chars().count() > VACCINE_NAME_MAX {
            return Err(VaccineValidationError::NameTooLong {
                max: VACCINE_NAME_MAX,
            });
        }
        Ok(Self {
            display: display.to_owned(),
            key: Self::key_for(display),
        })
    }

    /// Matching key for an arbitrary stored string.
    pub fn key_for(raw: &str) -> String {
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase()
    }

    /// Normalised key used for every equality comparison.
    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl AsRef<str> for VaccineName {
    fn as_ref(&self) -> &str {
        self.display.as_str()
    }
}

impl fmt::Display for VaccineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<VaccineName> for String {
    fn from(value: VaccineName) -> Self {
        value.display
    }
}

impl TryFrom<String> for VaccineName {
    type Error = VaccineValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative number of doses added by a restock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockAmount(i32);

impl StockAmount {
    /// Parse a form value into an amount.
    ///
    /// # Examples
    /// ```
    /// use vaccine_portal::domain::{StockAmount, VaccineValidationError};
    ///
    /// assert_eq!(StockAmount::parse(" 5 ").unwrap().value(), 5);
    /// assert_eq!(StockAmount::parse("-1"), Err(VaccineValidationError::NegativeAmount));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, VaccineValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VaccineValidationError::EmptyAmount);
        }
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if let Some(rest) = digits.strip_prefix('-') {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return Err(VaccineValidationError::NegativeAmount);
            }
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) || digits.is_empty() {
            return Err(VaccineValidationError::NotANumber {
                value: trimmed.to_owned(),
            });
        }
        digits
            .parse::<i32>()
            .map(Self)
            .map_err(|_| VaccineValidationError::AmountTooLarge { max: i32::MAX })
    }

    /// Wrap an already validated count.
    pub fn try_new(value: i32) -> Result<Self, VaccineValidationError> {
        if value < 0 {
            return Err(VaccineValidationError::NegativeAmount);
        }
        Ok(Self(value))
    }

    /// Number of doses.
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Vaccine row as shown on dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    #[schema(value_type = i32, example = 1)]
    pub id: VaccineId,
    #[schema(value_type = String, example = "Covaxin")]
    pub name: String,
    /// Doses left; never negative.
    #[schema(example = 10)]
    pub stock: i32,
}

impl Vaccine {
    /// Whether a booking could currently be accepted.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Result of an add-or-restock mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockOutcome {
    /// Vaccine after the stock change.
    pub vaccine: Vaccine,
    /// True when the vaccine did not exist before.
    pub created: bool,
    /// Pending requests flipped to "available now".
    pub requests_resolved: usize,
}
