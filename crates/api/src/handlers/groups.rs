//! Handlers for table groups.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::group::{validate_group_color, validate_group_name};
use wedplan_core::seating::records::GroupRecord;
use wedplan_core::types::DbId;
use wedplan_db::models::table_group::{CreateTableGroup, TableGroup, UpdateTableGroup};
use wedplan_db::repositories::TableGroupRepo;
use wedplan_events::{ChangeOp, EntityKind};

use crate::error::{AppError, AppResult};
use crate::handlers::weddings::require_wedding;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireTableEditor};
use crate::response::DataResponse;
use crate::seating::publish;
use crate::state::AppState;

fn group_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "TableGroup", id })
}

fn check_fields(name: Option<&str>, color: Option<&str>) -> AppResult<()> {
    if let Some(name) = name {
        validate_group_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(color) = color {
        validate_group_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    Ok(())
}

/// GET /api/v1/weddings/{id}/groups
pub async fn list_groups(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_wedding(&state, wedding_id).await?;
    let groups = TableGroupRepo::list_by_wedding(&state.pool, wedding_id).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/weddings/{id}/groups
///
/// Colour defaults to `#6366f1`, type to `standard`. Names are unique per
/// wedding (409 on duplicates).
pub async fn create_group(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Json(input): Json<CreateTableGroup>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_fields(Some(&input.name), input.color.as_deref())?;
    require_wedding(&state, wedding_id).await?;

    let group = TableGroupRepo::create(&state.pool, wedding_id, &input).await?;

    tracing::info!(
        group_id = group.id,
        wedding_id,
        user_id = user.user_id,
        name = %group.name,
        "Table group created"
    );
    publish_group(&state, &user, ChangeOp::Insert, &group)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// PUT /api/v1/groups/{id}
pub async fn update_group(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Json(input): Json<UpdateTableGroup>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_fields(input.name.as_deref(), input.color.as_deref())?;

    let group = TableGroupRepo::update(&state.pool, group_id, &input)
        .await?
        .ok_or_else(|| group_not_found(group_id))?;

    tracing::info!(group_id, user_id = user.user_id, "Table group updated");
    publish_group(&state, &user, ChangeOp::Update, &group)?;

    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/groups/{id}
///
/// Tables of the group become ungrouped.
pub async fn delete_group(
    RequireTableEditor(user): RequireTableEditor,
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let group = TableGroupRepo::find_by_id(&state.pool, group_id)
        .await?
        .ok_or_else(|| group_not_found(group_id))?;

    if !TableGroupRepo::delete(&state.pool, group_id).await? {
        return Err(group_not_found(group_id));
    }

    tracing::info!(group_id, user_id = user.user_id, "Table group deleted");
    publish::<GroupRecord>(
        &state,
        &user,
        EntityKind::Group,
        ChangeOp::Delete,
        group.wedding_id,
        group_id,
        None,
    );

    Ok(StatusCode::NO_CONTENT)
}

fn publish_group(
    state: &AppState,
    user: &AuthUser,
    op: ChangeOp,
    group: &TableGroup,
) -> AppResult<()> {
    let record = GroupRecord::try_from(group.clone())?;
    publish(
        state,
        user,
        EntityKind::Group,
        op,
        group.wedding_id,
        group.id,
        Some(&record),
    );
    Ok(())
}
