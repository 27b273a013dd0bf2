//! Route definitions for weddings and their scoped collections.

use axum::routing::get;
use axum::Router;

use crate::handlers::{groups, guests, seating_plan, tables, weddings};
use crate::state::AppState;

/// Routes mounted at `/weddings`.
///
/// ```text
/// GET    /                     -> list_weddings
/// POST   /                     -> create_wedding
/// GET    /{id}                 -> get_wedding
/// PUT    /{id}                 -> update_wedding
/// DELETE /{id}                 -> delete_wedding
/// GET    /{id}/guests          -> list_guests
/// POST   /{id}/guests          -> create_guest
/// GET    /{id}/groups          -> list_groups
/// POST   /{id}/groups          -> create_group
/// GET    /{id}/tables          -> list_tables
/// POST   /{id}/tables          -> create_table
/// GET    /{id}/seating-plan    -> get_seating_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(weddings::list_weddings).post(weddings::create_wedding),
        )
        .route(
            "/{id}",
            get(weddings::get_wedding)
                .put(weddings::update_wedding)
                .delete(weddings::delete_wedding),
        )
        .route(
            "/{id}/guests",
            get(guests::list_guests).post(guests::create_guest),
        )
        .route(
            "/{id}/groups",
            get(groups::list_groups).post(groups::create_group),
        )
        .route(
            "/{id}/tables",
            get(tables::list_tables).post(tables::create_table),
        )
        .route("/{id}/seating-plan", get(seating_plan::get_seating_plan))
}
