//! Seat model.
//!
//! Seats are created with their table and never through a DTO of their own;
//! occupancy changes go through the drop protocol.

use serde::Serialize;
use sqlx::FromRow;
use wedplan_core::seating::records::SeatRecord;
use wedplan_core::types::{DbId, Timestamp};

/// A row from the `seats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seat {
    pub id: DbId,
    pub table_id: DbId,
    pub seat_index: i32,
    pub guest_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Seat> for SeatRecord {
    fn from(row: Seat) -> Self {
        SeatRecord {
            id: row.id,
            table_id: row.table_id,
            seat_index: row.seat_index,
            guest_id: row.guest_id,
        }
    }
}
