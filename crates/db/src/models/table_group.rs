//! Table group models and DTOs.
//!
//! Groups are visual only: a colour and a type used to filter and tint the
//! tables assigned to them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::group::GroupType;
use wedplan_core::seating::records::GroupRecord;
use wedplan_core::types::{DbId, Timestamp};

/// A row from the `table_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TableGroup {
    pub id: DbId,
    pub wedding_id: DbId,
    pub name: String,
    pub color: String,
    pub group_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TableGroup> for GroupRecord {
    type Error = CoreError;

    fn try_from(row: TableGroup) -> Result<Self, Self::Error> {
        let group_type: GroupType = row.group_type.parse().map_err(CoreError::Internal)?;
        Ok(GroupRecord {
            id: row.id,
            name: row.name,
            color: row.color,
            group_type,
        })
    }
}

/// DTO for creating a group. Colour and type fall back to the defaults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTableGroup {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub color: Option<String>,
    pub group_type: Option<GroupType>,
}

/// DTO for partially updating a group.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTableGroup {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub color: Option<String>,
    pub group_type: Option<GroupType>,
}
