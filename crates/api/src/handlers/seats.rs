//! Handlers for seat occupancy.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wedplan_core::seating::planner::DropOutcome;
use wedplan_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::seating::{open_planner, publish_seats, wedding_of_seat};
use crate::state::AppState;

/// Body of a drop on a seat marker.
#[derive(Debug, Deserialize)]
pub struct SeatDropRequest {
    /// Raw drag payload as written at drag start.
    pub payload: String,
}

/// Body of a direct assignment.
#[derive(Debug, Deserialize)]
pub struct AssignSeatGuest {
    pub guest_id: DbId,
}

/// POST /api/v1/seats/{id}/drop
///
/// A guest payload seats the guest (moving them if already seated
/// elsewhere). Anything else is ignored. Occupied seats answer 409.
pub async fn drop_on_seat(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(seat_id): Path<DbId>,
    Json(input): Json<SeatDropRequest>,
) -> AppResult<impl IntoResponse> {
    let wedding_id = wedding_of_seat(&state, seat_id).await?;
    let mut planner = open_planner(&state, &user, wedding_id).await?;

    let outcome = planner.drop_on_seat(seat_id, &input.payload).await?;
    if let DropOutcome::Assigned(plan) = &outcome {
        let mut touched = vec![plan.seat_id];
        touched.extend(plan.vacate_seat_id);
        publish_seats(&state, &user, &planner, &touched);
    }

    Ok(Json(DataResponse { data: outcome }))
}

/// PUT /api/v1/seats/{id}/guest
pub async fn assign_guest(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(seat_id): Path<DbId>,
    Json(input): Json<AssignSeatGuest>,
) -> AppResult<impl IntoResponse> {
    let wedding_id = wedding_of_seat(&state, seat_id).await?;
    let mut planner = open_planner(&state, &user, wedding_id).await?;

    let plan = planner.assign_guest(seat_id, input.guest_id).await?;
    let mut touched = vec![plan.seat_id];
    touched.extend(plan.vacate_seat_id);
    publish_seats(&state, &user, &planner, &touched);

    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/v1/seats/{id}/guest
///
/// Vacating an already vacant seat succeeds without a write.
pub async fn remove_guest(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(seat_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let wedding_id = wedding_of_seat(&state, seat_id).await?;
    let mut planner = open_planner(&state, &user, wedding_id).await?;

    if planner.remove_guest(seat_id).await?.is_some() {
        publish_seats(&state, &user, &planner, &[seat_id]);
    }

    Ok(StatusCode::NO_CONTENT)
}
