//! Handlers for weddings, the parent of every seating arrangement.
//!
//! Anyone signed in may read; only owners create, rename or delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use wedplan_core::error::CoreError;
use wedplan_core::types::DbId;
use wedplan_db::models::wedding::{CreateWedding, UpdateWedding, Wedding};
use wedplan_db::repositories::WeddingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireOwner};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a wedding or fail with 404.
pub(crate) async fn require_wedding(state: &AppState, wedding_id: DbId) -> AppResult<Wedding> {
    WeddingRepo::find_by_id(&state.pool, wedding_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wedding",
            id: wedding_id,
        }))
}

/// GET /api/v1/weddings
pub async fn list_weddings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let weddings = WeddingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: weddings }))
}

/// POST /api/v1/weddings
pub async fn create_wedding(
    RequireOwner(user): RequireOwner,
    State(state): State<AppState>,
    Json(input): Json<CreateWedding>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Wedding name must not be empty".into(),
        )));
    }

    let wedding = WeddingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        wedding_id = wedding.id,
        user_id = user.user_id,
        name = %wedding.name,
        "Wedding created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: wedding })))
}

/// GET /api/v1/weddings/{id}
pub async fn get_wedding(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let wedding = require_wedding(&state, wedding_id).await?;
    Ok(Json(DataResponse { data: wedding }))
}

/// PUT /api/v1/weddings/{id}
pub async fn update_wedding(
    RequireOwner(user): RequireOwner,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
    Json(input): Json<UpdateWedding>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let wedding = WeddingRepo::update(&state.pool, wedding_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wedding",
            id: wedding_id,
        }))?;

    tracing::info!(wedding_id, user_id = user.user_id, "Wedding updated");

    Ok(Json(DataResponse { data: wedding }))
}

/// DELETE /api/v1/weddings/{id}
///
/// Tables, seats, guests and groups of the wedding go with it.
pub async fn delete_wedding(
    RequireOwner(user): RequireOwner,
    State(state): State<AppState>,
    Path(wedding_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WeddingRepo::delete(&state.pool, wedding_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wedding",
            id: wedding_id,
        }));
    }

    tracing::info!(wedding_id, user_id = user.user_id, "Wedding deleted");

    Ok(StatusCode::NO_CONTENT)
}
