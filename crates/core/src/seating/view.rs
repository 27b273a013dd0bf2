//! Merged seating-plan view: tables with positioned seats and their guests,
//! the unassigned guest pool and the group badge counts.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::guest_pool::{filter_guests, GuestFilter};
use crate::seating::assignment::SeatState;
use crate::seating::canvas::CanvasPoint;
use crate::seating::filter::{table_count_per_group, visible_tables};
use crate::seating::geometry::{seat_offset, SeatOffset, TableShape};
use crate::seating::records::{GroupRecord, GuestRecord, PlanSnapshot, TableRecord};
use crate::types::{DbId, Degrees, Pixels};

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat_id: DbId,
    pub seat_index: i32,
    pub offset: SeatOffset,
    pub state: SeatState,
    pub guest: Option<GuestRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub id: DbId,
    pub name: String,
    pub shape: TableShape,
    pub position: CanvasPoint,
    pub width: Pixels,
    pub height: Pixels,
    pub rotation: Degrees,
    pub capacity: i32,
    pub group_id: Option<DbId>,
    pub occupied: usize,
    pub seats: Vec<SeatView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub wedding_id: DbId,
    pub selected_group: Option<DbId>,
    pub tables: Vec<TableView>,
    pub unassigned_guests: Vec<GuestRecord>,
    pub groups: Vec<GroupRecord>,
    pub table_counts: BTreeMap<DbId, usize>,
}

/// Seats of a table with their computed marker offsets, in index order.
///
/// The seat count used for geometry is the number of seats the table has,
/// which equals its capacity at creation.
pub fn seat_views(table: &TableRecord, guests: &HashMap<DbId, &GuestRecord>) -> Vec<SeatView> {
    let mut seats: Vec<_> = table.seats.iter().collect();
    seats.sort_by_key(|s| s.seat_index);
    let count = seats.len();

    seats
        .into_iter()
        .map(|seat| SeatView {
            seat_id: seat.id,
            seat_index: seat.seat_index,
            offset: seat_offset(
                table.shape,
                table.width,
                table.height,
                usize::try_from(seat.seat_index).unwrap_or(0),
                count,
            ),
            state: SeatState::of(seat.guest_id),
            guest: seat
                .guest_id
                .and_then(|id| guests.get(&id))
                .map(|g| (*g).clone()),
        })
        .collect()
}

/// Build the view for `snapshot`, narrowed to `selected_group` if given.
pub fn build_view(snapshot: &PlanSnapshot, selected_group: Option<DbId>) -> PlanView {
    let guests: HashMap<DbId, &GuestRecord> =
        snapshot.guests.iter().map(|g| (g.id, g)).collect();

    let tables = visible_tables(&snapshot.tables, selected_group)
        .into_iter()
        .map(|t| {
            let seats = seat_views(t, &guests);
            TableView {
                id: t.id,
                name: t.name.clone(),
                shape: t.shape,
                position: t.position,
                width: t.width,
                height: t.height,
                rotation: t.rotation,
                capacity: t.capacity,
                group_id: t.group_id,
                occupied: seats.iter().filter(|s| !s.state.is_vacant()).count(),
                seats,
            }
        })
        .collect();

    let seated: HashSet<DbId> = snapshot.seats().filter_map(|s| s.guest_id).collect();
    let unassigned_guests = filter_guests(
        &snapshot.guests,
        &GuestFilter {
            unassigned_only: true,
            ..Default::default()
        },
        &seated,
    )
    .into_iter()
    .cloned()
    .collect();

    PlanView {
        wedding_id: snapshot.wedding_id,
        selected_group,
        tables,
        unassigned_guests,
        groups: snapshot.groups.clone(),
        table_counts: table_count_per_group(&snapshot.tables),
    }
}
