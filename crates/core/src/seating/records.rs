//! Plain records the seating coordinator works on.
//!
//! These are storage-agnostic mirrors of the persisted rows; `wedplan-db`
//! converts its `FromRow` models into them.

use serde::{Deserialize, Serialize};

use crate::group::GroupType;
use crate::guest_pool::RsvpStatus;
use crate::seating::canvas::CanvasPoint;
use crate::seating::filter::Grouped;
use crate::seating::geometry::TableShape;
use crate::types::{DbId, Degrees, Pixels};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub id: DbId,
    pub table_id: DbId,
    pub seat_index: i32,
    pub guest_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: DbId,
    pub wedding_id: DbId,
    pub name: String,
    pub shape: TableShape,
    pub position: CanvasPoint,
    pub width: Pixels,
    pub height: Pixels,
    pub rotation: Degrees,
    pub capacity: i32,
    pub group_id: Option<DbId>,
    /// Ordered by `seat_index`.
    #[serde(default)]
    pub seats: Vec<SeatRecord>,
}

impl Grouped for TableRecord {
    fn group_id(&self) -> Option<DbId> {
        self.group_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub rsvp_status: RsvpStatus,
    pub dietary_restrictions: Option<String>,
    pub plus_one: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub group_type: GroupType,
}

/// Everything the planner needs for one wedding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub wedding_id: DbId,
    pub tables: Vec<TableRecord>,
    pub guests: Vec<GuestRecord>,
    pub groups: Vec<GroupRecord>,
}

impl PlanSnapshot {
    pub fn table(&self, table_id: DbId) -> Option<&TableRecord> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_mut(&mut self, table_id: DbId) -> Option<&mut TableRecord> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    pub fn seat(&self, seat_id: DbId) -> Option<&SeatRecord> {
        self.seats().find(|s| s.id == seat_id)
    }

    pub fn seat_mut(&mut self, seat_id: DbId) -> Option<&mut SeatRecord> {
        self.tables
            .iter_mut()
            .flat_map(|t| t.seats.iter_mut())
            .find(|s| s.id == seat_id)
    }

    pub fn guest(&self, guest_id: DbId) -> Option<&GuestRecord> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    pub fn group(&self, group_id: DbId) -> Option<&GroupRecord> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn seats(&self) -> impl Iterator<Item = &SeatRecord> {
        self.tables.iter().flat_map(|t| t.seats.iter())
    }

    /// Seat currently held by `guest_id`, if any.
    pub fn seat_of_guest(&self, guest_id: DbId) -> Option<DbId> {
        self.seats()
            .find(|s| s.guest_id == Some(guest_id))
            .map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PlanSnapshot {
        PlanSnapshot {
            wedding_id: 1,
            tables: vec![TableRecord {
                id: 10,
                wedding_id: 1,
                name: "T1".into(),
                shape: TableShape::Round,
                position: CanvasPoint::new(0.0, 0.0),
                width: 200.0,
                height: 200.0,
                rotation: 0.0,
                capacity: 2,
                group_id: None,
                seats: vec![
                    SeatRecord { id: 100, table_id: 10, seat_index: 0, guest_id: Some(7) },
                    SeatRecord { id: 101, table_id: 10, seat_index: 1, guest_id: None },
                ],
            }],
            guests: vec![],
            groups: vec![],
        }
    }

    #[test]
    fn finds_seat_of_guest() {
        let s = snapshot();
        assert_eq!(s.seat_of_guest(7), Some(100));
        assert_eq!(s.seat_of_guest(8), None);
    }

    #[test]
    fn seat_lookup_spans_tables() {
        let mut s = snapshot();
        assert!(s.seat(101).is_some());
        s.seat_mut(101).unwrap().guest_id = Some(3);
        assert_eq!(s.seat_of_guest(3), Some(101));
    }

    #[test]
    fn table_without_seats_deserializes() {
        let json = serde_json::json!({
            "id": 1, "wedding_id": 1, "name": "T", "shape": "rectangle",
            "position": {"x": 1.0, "y": 2.0}, "width": 300.0, "height": 150.0,
            "rotation": 45.0, "capacity": 8, "group_id": null
        });
        let t: TableRecord = serde_json::from_value(json).unwrap();
        assert!(t.seats.is_empty());
        assert_eq!(t.shape, TableShape::Rectangle);
    }
}
