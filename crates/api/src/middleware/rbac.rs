//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement.
//!
//! Seat and table operations deliberately take [`RequireAuth`] instead of
//! [`RequireTableEditor`]: the seating planner performs its own capability
//! check so the rejection carries the planner's notice text.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wedplan_core::error::CoreError;
use wedplan_core::roles::{can_edit_tables, can_manage_weddings};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `owner` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn owner_only(RequireOwner(user): RequireOwner) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOwner(pub AuthUser);

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_manage_weddings(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner role required".into(),
            )));
        }
        Ok(RequireOwner(user))
    }
}

/// Requires `owner` or `planner` role. Rejects with 403 Forbidden otherwise.
pub struct RequireTableEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireTableEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_edit_tables(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or Planner role required".into(),
            )));
        }
        Ok(RequireTableEditor(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// ```ignore
/// async fn any_authed(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
