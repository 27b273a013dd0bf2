//! Handlers for the guest list of a wedding.
//!
//! The list endpoint applies the guest-pool filter (search, category, RSVP
//! status, unassigned only) against the current seat occupancy.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::guest_pool::{filter_guests, validate_guest_name, GuestFilter};
use wedplan_core::seating::records::GuestRecord;
use wedplan_core::types::DbId;
use wedplan_db::models::guest::{CreateGuest, Guest, UpdateGuest};
use wedplan_db::repositories::{GuestRepo, SeatRepo};
use wedplan_events::{ChangeOp, EntityKind};

use crate::error::{AppError, AppResult};
use crate::handlers::weddings::require_wedding;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireTableEditor};
use crate::response::DataResponse;
use crate::seating::publish;
use crate::state::AppState;

fn guest_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Guest", id })
}

/// GET /api/v1/weddings/{id}/guests
///
/// Query: `search`, `category`, `rsvp_status`, `unassigned_only`.
/// Sorted by name.
pub async fn list_guests(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Query(filter): Query<GuestFilter>,
) -> AppResult<impl IntoResponse> {
    require_wedding(&state, wedding_id).await?;

    let guests = GuestRepo::list_by_wedding(&state.pool, wedding_id)
        .await?
        .into_iter()
        .map(GuestRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let seated: HashSet<DbId> = SeatRepo::list_by_wedding(&state.pool, wedding_id)
        .await?
        .into_iter()
        .filter_map(|s| s.guest_id)
        .collect();

    let data: Vec<GuestRecord> = filter_guests(&guests, &filter, &seated)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/weddings/{id}/guests
pub async fn create_guest(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Json(input): Json<CreateGuest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_guest_name(&input.name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    require_wedding(&state, wedding_id).await?;

    let guest = GuestRepo::create(&state.pool, wedding_id, &input).await?;

    tracing::info!(
        guest_id = guest.id,
        wedding_id,
        user_id = user.user_id,
        "Guest created"
    );
    publish_guest(&state, &user, ChangeOp::Insert, &guest)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: guest })))
}

/// GET /api/v1/guests/{id}
pub async fn get_guest(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(guest_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let guest = GuestRepo::find_by_id(&state.pool, guest_id)
        .await?
        .ok_or_else(|| guest_not_found(guest_id))?;

    Ok(Json(DataResponse { data: guest }))
}

/// PUT /api/v1/guests/{id}
pub async fn update_guest(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(guest_id): Path<DbId>,
    Json(input): Json<UpdateGuest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_guest_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let guest = GuestRepo::update(&state.pool, guest_id, &input)
        .await?
        .ok_or_else(|| guest_not_found(guest_id))?;

    tracing::info!(guest_id, user_id = user.user_id, "Guest updated");
    publish_guest(&state, &user, ChangeOp::Update, &guest)?;

    Ok(Json(DataResponse { data: guest }))
}

/// DELETE /api/v1/guests/{id}
///
/// The guest's seat, if any, becomes vacant.
pub async fn delete_guest(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(guest_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let guest = GuestRepo::find_by_id(&state.pool, guest_id)
        .await?
        .ok_or_else(|| guest_not_found(guest_id))?;

    if !GuestRepo::delete(&state.pool, guest_id).await? {
        return Err(guest_not_found(guest_id));
    }

    tracing::info!(guest_id, user_id = user.user_id, "Guest deleted");
    publish::<GuestRecord>(
        &state,
        &user,
        EntityKind::Guest,
        ChangeOp::Delete,
        guest.wedding_id,
        guest_id,
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

fn publish_guest(
    state: &AppState,
    user: &AuthUser,
    op: ChangeOp,
    guest: &Guest,
) -> AppResult<()> {
    let record = GuestRecord::try_from(guest.clone())?;
    publish(
        state,
        user,
        EntityKind::Guest,
        op,
        guest.wedding_id,
        guest.id,
        Some(&record),
    );
    Ok(())
}
