//! Seat assignment protocol.
//!
//! A seat is either vacant or occupied by exactly one guest. A guest drop is
//! accepted only when the seat is vacant and the actor may edit tables.
//! Assignment is a move: if the guest already sits elsewhere, that seat is
//! vacated in the same write, so a guest never occupies two seats.

use serde::Serialize;

use crate::types::DbId;

/// Occupancy of a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "guest_id", rename_all = "snake_case")]
pub enum SeatState {
    Vacant,
    Occupied(DbId),
}

impl SeatState {
    pub fn of(guest_id: Option<DbId>) -> Self {
        match guest_id {
            Some(id) => SeatState::Occupied(id),
            None => SeatState::Vacant,
        }
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, SeatState::Vacant)
    }
}

/// Why a guest drop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DropRejection {
    #[error("Editing tables is not permitted")]
    PermissionDenied,

    #[error("Seat is already occupied by guest {guest_id}")]
    SeatOccupied { guest_id: DbId },
}

/// Accept predicate for a guest drop on a seat.
///
/// Permission is checked first so a read-only user never learns more than
/// "not permitted".
pub fn accept_guest_drop(state: SeatState, can_edit: bool) -> Result<(), DropRejection> {
    if !can_edit {
        return Err(DropRejection::PermissionDenied);
    }
    match state {
        SeatState::Vacant => Ok(()),
        SeatState::Occupied(guest_id) => Err(DropRejection::SeatOccupied { guest_id }),
    }
}

/// A confirmed-acceptable assignment, ready for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentPlan {
    pub seat_id: DbId,
    pub guest_id: DbId,
    /// Seat the guest currently occupies, cleared in the same transaction.
    pub vacate_seat_id: Option<DbId>,
}

/// Decide what a guest drop on `seat_id` has to write.
///
/// `current_seat` is the seat the guest occupies right now, if any.
pub fn plan_assignment(
    seat_id: DbId,
    state: SeatState,
    guest_id: DbId,
    current_seat: Option<DbId>,
    can_edit: bool,
) -> Result<AssignmentPlan, DropRejection> {
    accept_guest_drop(state, can_edit)?;
    Ok(AssignmentPlan {
        seat_id,
        guest_id,
        vacate_seat_id: current_seat.filter(|&s| s != seat_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn vacant_seat_with_permission_accepts() {
        assert!(accept_guest_drop(SeatState::Vacant, true).is_ok());
    }

    #[test]
    fn occupied_seat_rejects() {
        assert_matches!(
            accept_guest_drop(SeatState::Occupied(4), true),
            Err(DropRejection::SeatOccupied { guest_id: 4 })
        );
    }

    #[test]
    fn permission_checked_before_occupancy() {
        assert_eq!(
            accept_guest_drop(SeatState::Occupied(4), false),
            Err(DropRejection::PermissionDenied)
        );
        assert_eq!(
            accept_guest_drop(SeatState::Vacant, false),
            Err(DropRejection::PermissionDenied)
        );
    }

    #[test]
    fn unseated_guest_plan_has_nothing_to_vacate() {
        let plan = plan_assignment(10, SeatState::Vacant, 5, None, true).unwrap();
        assert_eq!(
            plan,
            AssignmentPlan { seat_id: 10, guest_id: 5, vacate_seat_id: None }
        );
    }

    #[test]
    fn seated_guest_plan_moves() {
        let plan = plan_assignment(10, SeatState::Vacant, 5, Some(3), true).unwrap();
        assert_eq!(plan.vacate_seat_id, Some(3));
    }

    #[test]
    fn redrop_on_own_seat_is_occupied() {
        assert_matches!(
            plan_assignment(10, SeatState::Occupied(5), 5, Some(10), true),
            Err(DropRejection::SeatOccupied { guest_id: 5 })
        );
    }

    #[test]
    fn seat_state_from_option() {
        assert!(SeatState::of(None).is_vacant());
        assert_eq!(SeatState::of(Some(2)), SeatState::Occupied(2));
    }
}
