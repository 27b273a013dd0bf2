use axum::routing::put;
use axum::Router;

use crate::handlers::groups;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// PUT    /{id}  -> update_group
/// DELETE /{id}  -> delete_group
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(groups::update_group).delete(groups::delete_group),
    )
}
