//! Requests for vaccines that are not currently bookable.
//!
//! A request is resolved (`pending -> available now`) when an admin adds or
//! restocks a vaccine whose name matches it. Nothing ties the requested name
//! to an existing vaccine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{UnknownStatus, UserId};

/// Auto-incremented request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(i32);

impl RequestId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request status as stored in the free-text status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    /// Waiting for matching stock.
    #[serde(rename = "pending")]
    Pending,
    /// Matching stock was added after the request was filed.
    #[serde(rename = "available now")]
    AvailableNow,
}

impl RequestStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AvailableNow => "available now",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "available now" => Ok(Self::AvailableNow),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRequest {
    #[schema(value_type = i32, example = 1)]
    pub id: RequestId,
    #[schema(value_type = i32, example = 1)]
    pub user_id: UserId,
    #[schema(example = "Sputnik X")]
    pub vaccine_name: String,
    pub status: RequestStatus,
}

/// Request joined with its owner's name, as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequestView {
    #[schema(value_type = i32, example = 1)]
    pub id: RequestId,
    #[schema(example = "Ada Lovelace")]
    pub user_name: String,
    #[schema(example = "Sputnik X")]
    pub vaccine_name: String,
    pub status: RequestStatus,
}
