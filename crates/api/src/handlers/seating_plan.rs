//! The merged seating-plan view used to render the canvas.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use wedplan_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::query::GroupFilterParams;
use crate::response::DataResponse;
use crate::seating::open_planner;
use crate::state::AppState;

/// GET /api/v1/weddings/{id}/seating-plan
///
/// Tables (narrowed by `?group_id=`) with positioned seats, the unassigned
/// guest pool and per-group table counts.
pub async fn get_seating_plan(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Query(params): Query<GroupFilterParams>,
) -> AppResult<impl IntoResponse> {
    let planner = open_planner(&state, &user, wedding_id).await?;
    Ok(Json(DataResponse {
        data: planner.view(params.group_id),
    }))
}
