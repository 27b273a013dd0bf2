use axum::routing::{post, put};
use axum::Router;

use crate::handlers::seats;
use crate::state::AppState;

/// Routes mounted at `/seats`.
///
/// ```text
/// POST   /{id}/drop   -> drop_on_seat
/// PUT    /{id}/guest  -> assign_guest
/// DELETE /{id}/guest  -> remove_guest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/drop", post(seats::drop_on_seat))
        .route(
            "/{id}/guest",
            put(seats::assign_guest).delete(seats::remove_guest),
        )
}
