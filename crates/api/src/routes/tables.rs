//! Route definitions for table operations on the canvas.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tables;
use crate::state::AppState;

/// Routes mounted at `/tables`.
///
/// ```text
/// GET    /{id}            -> get_table
/// PUT    /{id}            -> update_table
/// DELETE /{id}            -> delete_table
/// PUT    /{id}/position   -> update_position
/// POST   /{id}/drop       -> drop_table
/// POST   /{id}/rotate     -> rotate_table
/// PUT    /{id}/group      -> assign_group
/// GET    /{id}/seats      -> list_seats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(tables::get_table)
                .put(tables::update_table)
                .delete(tables::delete_table),
        )
        .route("/{id}/position", put(tables::update_position))
        .route("/{id}/drop", post(tables::drop_table))
        .route("/{id}/rotate", post(tables::rotate_table))
        .route("/{id}/group", put(tables::assign_group))
        .route("/{id}/seats", get(tables::list_seats))
}
