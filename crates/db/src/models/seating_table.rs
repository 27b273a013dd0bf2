//! Seating table models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::seating::canvas::CanvasPoint;
use wedplan_core::seating::geometry::TableShape;
use wedplan_core::seating::records::{SeatRecord, TableRecord};
use wedplan_core::seating::table_spec::NewTable;
use wedplan_core::types::{DbId, Degrees, Pixels, Timestamp};

use super::seat::Seat;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `seating_tables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeatingTable {
    pub id: DbId,
    pub wedding_id: DbId,
    pub name: String,
    pub shape: String,
    pub position_x: Pixels,
    pub position_y: Pixels,
    pub width: Pixels,
    pub height: Pixels,
    pub rotation: Degrees,
    pub capacity: i32,
    pub group_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SeatingTable {
    /// Combine the row with its seats into the record the planner uses.
    pub fn into_record(self, seats: Vec<Seat>) -> Result<TableRecord, CoreError> {
        let shape: TableShape = self.shape.parse().map_err(CoreError::Internal)?;
        let mut seats: Vec<SeatRecord> = seats.into_iter().map(Into::into).collect();
        seats.sort_by_key(|s| s.seat_index);
        Ok(TableRecord {
            id: self.id,
            wedding_id: self.wedding_id,
            name: self.name,
            shape,
            position: CanvasPoint::new(self.position_x, self.position_y),
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            capacity: self.capacity,
            group_id: self.group_id,
            seats,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a table. Seats are created from `capacity`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSeatingTable {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub shape: TableShape,
    #[validate(range(min = 1, max = 40))]
    pub capacity: i32,
    pub width: Option<Pixels>,
    pub height: Option<Pixels>,
    pub position_x: Option<Pixels>,
    pub position_y: Option<Pixels>,
}

impl From<CreateSeatingTable> for NewTable {
    fn from(dto: CreateSeatingTable) -> Self {
        let position = match (dto.position_x, dto.position_y) {
            (Some(x), Some(y)) => Some(CanvasPoint::new(x, y)),
            _ => None,
        };
        NewTable {
            name: dto.name,
            shape: dto.shape,
            capacity: dto.capacity,
            width: dto.width,
            height: dto.height,
            position,
        }
    }
}

/// DTO for partially updating a table's name or size.
///
/// Capacity is fixed at creation; position and rotation have their own
/// endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSeatingTable {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub width: Option<Pixels>,
    pub height: Option<Pixels>,
}

/// DTO for an explicit position write.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTablePosition {
    pub position_x: Pixels,
    pub position_y: Pixels,
    pub rotation: Option<Degrees>,
}

/// DTO for assigning a table to a group, or clearing it with `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTableGroup {
    pub group_id: Option<DbId>,
}
