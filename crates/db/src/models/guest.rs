//! Guest models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::guest_pool::RsvpStatus;
use wedplan_core::seating::records::GuestRecord;
use wedplan_core::types::{DbId, Timestamp};

/// A row from the `guests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Guest {
    pub id: DbId,
    pub wedding_id: DbId,
    pub name: String,
    pub category: String,
    pub rsvp_status: String,
    pub dietary_restrictions: Option<String>,
    pub plus_one: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Guest> for GuestRecord {
    type Error = CoreError;

    fn try_from(row: Guest) -> Result<Self, Self::Error> {
        let rsvp_status: RsvpStatus = row.rsvp_status.parse().map_err(CoreError::Internal)?;
        Ok(GuestRecord {
            id: row.id,
            name: row.name,
            category: row.category,
            rsvp_status,
            dietary_restrictions: row.dietary_restrictions,
            plus_one: row.plus_one,
        })
    }
}

/// DTO for creating a guest. The wedding comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGuest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub dietary_restrictions: Option<String>,
    pub plus_one: Option<bool>,
}

/// DTO for partially updating a guest.
///
/// `dietary_restrictions` uses `Option<Option<String>>` so it can be cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGuest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(default, with = "double_option")]
    pub dietary_restrictions: Option<Option<String>>,
    pub plus_one: Option<bool>,
}

/// Distinguishes an absent field from an explicit `null`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
