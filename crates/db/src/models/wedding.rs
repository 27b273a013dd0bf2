//! Wedding models and DTOs.
//!
//! A wedding owns every table, guest and group of one seating arrangement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wedplan_core::types::{DbId, Timestamp};

/// A row from the `weddings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wedding {
    pub id: DbId,
    pub name: String,
    pub wedding_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a wedding.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWedding {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub wedding_date: Option<NaiveDate>,
}

/// DTO for partially updating a wedding.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWedding {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
}
