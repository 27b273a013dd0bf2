//! Handlers for seating tables.
//!
//! Everything that moves, rotates, groups, adds or removes a table runs
//! through the seating planner, which checks the edit capability before
//! touching the store. Confirmed changes are published on the change bus.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::seating::canvas::{CanvasPoint, DEFAULT_ZOOM};
use wedplan_core::seating::drag::DragPayload;
use wedplan_core::seating::filter::visible_tables;
use wedplan_core::seating::planner::DropOutcome;
use wedplan_core::seating::records::{GuestRecord, TableRecord};
use wedplan_core::seating::table_spec::{validate_dimension, validate_table_name};
use wedplan_core::seating::view::seat_views;
use wedplan_core::types::{DbId, Pixels};
use wedplan_db::models::seating_table::{
    AssignTableGroup, CreateSeatingTable, UpdateSeatingTable, UpdateTablePosition,
};
use wedplan_db::repositories::{SeatRepo, SeatingTableRepo};
use wedplan_events::{ChangeOp, EntityKind};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireTableEditor};
use crate::query::GroupFilterParams;
use crate::response::DataResponse;
use crate::seating::{open_planner, publish, publish_table, wedding_of_table, Planner};
use crate::state::AppState;

/// Body of a drop on the empty canvas.
///
/// Pointer and canvas origin are viewport pixels; the zoom is the canvas
/// scale in effect at drop time.
#[derive(Debug, Deserialize)]
pub struct CanvasDropRequest {
    /// Raw drag payload as written at drag start.
    pub payload: String,
    pub pointer_x: Pixels,
    pub pointer_y: Pixels,
    #[serde(default)]
    pub canvas_left: Pixels,
    #[serde(default)]
    pub canvas_top: Pixels,
    pub zoom: Option<f64>,
}

fn table_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Table", id })
}

fn table_of(planner: &Planner, table_id: DbId) -> AppResult<TableRecord> {
    planner
        .snapshot()
        .table(table_id)
        .cloned()
        .ok_or_else(|| table_not_found(table_id))
}

async fn planner_for_table(
    state: &AppState,
    user: &AuthUser,
    table_id: DbId,
) -> AppResult<Planner> {
    let wedding_id = wedding_of_table(state, table_id).await?;
    open_planner(state, user, wedding_id).await
}

/// GET /api/v1/weddings/{id}/tables
///
/// Optional `?group_id=` narrows to one group.
pub async fn list_tables(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Query(params): Query<GroupFilterParams>,
) -> AppResult<impl IntoResponse> {
    let planner = open_planner(&state, &user, wedding_id).await?;
    let data: Vec<TableRecord> = visible_tables(&planner.snapshot().tables, params.group_id)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/weddings/{id}/tables
///
/// Creates the table and `capacity` vacant seats together.
pub async fn create_table(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Json(input): Json<CreateSeatingTable>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut planner = open_planner(&state, &user, wedding_id).await?;
    let table = planner.add_table(input.into()).await?;

    publish(
        &state,
        &user,
        EntityKind::Table,
        ChangeOp::Insert,
        wedding_id,
        table.id,
        Some(&table),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: table })))
}

/// GET /api/v1/tables/{id}
pub async fn get_table(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let planner = planner_for_table(&state, &user, table_id).await?;
    Ok(Json(DataResponse {
        data: table_of(&planner, table_id)?,
    }))
}

/// PUT /api/v1/tables/{id}
///
/// Rename or resize. Capacity is fixed once seats exist.
pub async fn update_table(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
    Json(input): Json<UpdateSeatingTable>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let invalid = |e: wedplan_core::seating::table_spec::TableSpecError| {
        AppError::Core(CoreError::Validation(e.to_string()))
    };
    if let Some(name) = &input.name {
        validate_table_name(name).map_err(invalid)?;
    }
    if let Some(width) = input.width {
        validate_dimension("width", width).map_err(invalid)?;
    }
    if let Some(height) = input.height {
        validate_dimension("height", height).map_err(invalid)?;
    }

    let table = SeatingTableRepo::update(&state.pool, table_id, &input)
        .await?
        .ok_or_else(|| table_not_found(table_id))?;
    let seats = SeatRepo::list_by_table(&state.pool, table_id).await?;
    let record = table.into_record(seats)?;

    tracing::info!(table_id, user_id = user.user_id, "Table updated");
    publish(
        &state,
        &user,
        EntityKind::Table,
        ChangeOp::Update,
        record.wedding_id,
        table_id,
        Some(&record),
    );

    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/tables/{id}
///
/// Seats go with the table; their guests return to the pool.
pub async fn delete_table(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut planner = planner_for_table(&state, &user, table_id).await?;
    let wedding_id = planner.snapshot().wedding_id;
    planner.delete_table(table_id).await?;

    publish::<TableRecord>(
        &state,
        &user,
        EntityKind::Table,
        ChangeOp::Delete,
        wedding_id,
        table_id,
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/tables/{id}/position
///
/// Explicit position, with an optional rotation (normalized to `[0, 360)`).
pub async fn update_position(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
    Json(input): Json<UpdateTablePosition>,
) -> AppResult<impl IntoResponse> {
    let mut planner = planner_for_table(&state, &user, table_id).await?;
    planner
        .move_table(
            table_id,
            CanvasPoint::new(input.position_x, input.position_y),
            input.rotation,
        )
        .await?;

    publish_table(&state, &user, &planner, table_id);
    Ok(Json(DataResponse {
        data: table_of(&planner, table_id)?,
    }))
}

/// POST /api/v1/tables/{id}/drop
///
/// A table dragged across the canvas was released. The payload must name
/// this table. Unreadable payloads are ignored.
pub async fn drop_table(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
    Json(input): Json<CanvasDropRequest>,
) -> AppResult<impl IntoResponse> {
    let mut planner = planner_for_table(&state, &user, table_id).await?;

    if let Ok(DragPayload::Table { table_id: dragged, .. }) = DragPayload::parse(&input.payload) {
        planner.require_edit()?;
        if dragged != table_id {
            return Err(AppError::BadRequest(format!(
                "Payload names table {dragged}, not table {table_id}"
            )));
        }
    }

    let outcome = planner
        .drop_on_canvas(
            &input.payload,
            CanvasPoint::new(input.pointer_x, input.pointer_y),
            CanvasPoint::new(input.canvas_left, input.canvas_top),
            input.zoom.unwrap_or(DEFAULT_ZOOM),
        )
        .await?;

    if let DropOutcome::Moved { table_id, .. } = &outcome {
        publish_table(&state, &user, &planner, *table_id);
    }

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/tables/{id}/rotate
///
/// Rotates by one 45 degree step, wrapping at 360.
pub async fn rotate_table(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut planner = planner_for_table(&state, &user, table_id).await?;
    planner.rotate_table(table_id).await?;

    publish_table(&state, &user, &planner, table_id);
    Ok(Json(DataResponse {
        data: table_of(&planner, table_id)?,
    }))
}

/// PUT /api/v1/tables/{id}/group
///
/// `{"group_id": null}` clears the group.
pub async fn assign_group(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
    Json(input): Json<AssignTableGroup>,
) -> AppResult<impl IntoResponse> {
    let mut planner = planner_for_table(&state, &user, table_id).await?;
    planner.assign_group(table_id, input.group_id).await?;

    publish_table(&state, &user, &planner, table_id);
    Ok(Json(DataResponse {
        data: table_of(&planner, table_id)?,
    }))
}

/// GET /api/v1/tables/{id}/seats
///
/// Seats in index order with their marker offsets and seated guests.
pub async fn list_seats(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(table_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let planner = planner_for_table(&state, &user, table_id).await?;
    let snapshot = planner.snapshot();
    let table = snapshot
        .table(table_id)
        .ok_or_else(|| table_not_found(table_id))?;
    let guests: HashMap<DbId, &GuestRecord> =
        snapshot.guests.iter().map(|g| (g.id, g)).collect();

    Ok(Json(DataResponse {
        data: seat_views(table, &guests),
    }))
}
