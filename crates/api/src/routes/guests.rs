use axum::routing::get;
use axum::Router;

use crate::handlers::guests;
use crate::state::AppState;

/// Routes mounted at `/guests`.
///
/// ```text
/// GET    /{id}  -> get_guest
/// PUT    /{id}  -> update_guest
/// DELETE /{id}  -> delete_guest
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(guests::get_guest)
            .put(guests::update_guest)
            .delete(guests::delete_guest),
    )
}
