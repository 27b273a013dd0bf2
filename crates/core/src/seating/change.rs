//! Reconciling a plan snapshot with pushed change notifications.
//!
//! Other sessions edit the same arrangement; their confirmed writes arrive
//! as [`ChangeNotice`]s and are folded into the local snapshot, which never
//! holds anything the store has not confirmed.

use serde::{Deserialize, Serialize};

use crate::seating::records::{GroupRecord, GuestRecord, PlanSnapshot, SeatRecord, TableRecord};
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum ChangeNotice {
    /// Insert or update. An empty `seats` list keeps the seats already known.
    TableUpserted(TableRecord),
    TableDeleted(DbId),
    SeatUpdated(SeatRecord),
    GuestUpserted(GuestRecord),
    GuestDeleted(DbId),
    GroupUpserted(GroupRecord),
    GroupDeleted(DbId),
}

/// Fold one notice into `snapshot`. Notices for other weddings are ignored.
pub fn apply_change(snapshot: &mut PlanSnapshot, notice: ChangeNotice) {
    match notice {
        ChangeNotice::TableUpserted(mut table) => {
            if table.wedding_id != snapshot.wedding_id {
                return;
            }
            match snapshot.table_mut(table.id) {
                Some(existing) => {
                    if table.seats.is_empty() {
                        table.seats = std::mem::take(&mut existing.seats);
                    }
                    *existing = table;
                }
                None => snapshot.tables.push(table),
            }
        }
        ChangeNotice::TableDeleted(id) => snapshot.tables.retain(|t| t.id != id),
        ChangeNotice::SeatUpdated(seat) => {
            // A guest holds at most one seat.
            if let Some(guest_id) = seat.guest_id {
                for other in snapshot
                    .tables
                    .iter_mut()
                    .flat_map(|t| t.seats.iter_mut())
                    .filter(|s| s.id != seat.id && s.guest_id == Some(guest_id))
                {
                    other.guest_id = None;
                }
            }
            if let Some(existing) = snapshot.seat_mut(seat.id) {
                *existing = seat;
            }
        }
        ChangeNotice::GuestUpserted(guest) => {
            match snapshot.guests.iter_mut().find(|g| g.id == guest.id) {
                Some(existing) => *existing = guest,
                None => snapshot.guests.push(guest),
            }
        }
        ChangeNotice::GuestDeleted(id) => {
            snapshot.guests.retain(|g| g.id != id);
            for seat in snapshot
                .tables
                .iter_mut()
                .flat_map(|t| t.seats.iter_mut())
                .filter(|s| s.guest_id == Some(id))
            {
                seat.guest_id = None;
            }
        }
        ChangeNotice::GroupUpserted(group) => {
            match snapshot.groups.iter_mut().find(|g| g.id == group.id) {
                Some(existing) => *existing = group,
                None => snapshot.groups.push(group),
            }
        }
        ChangeNotice::GroupDeleted(id) => {
            snapshot.groups.retain(|g| g.id != id);
            for table in snapshot.tables.iter_mut().filter(|t| t.group_id == Some(id)) {
                table.group_id = None;
            }
        }
    }
}
