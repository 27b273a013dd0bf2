pub mod groups;
pub mod guests;
pub mod health;
pub mod seats;
pub mod tables;
pub mod weddings;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (live seating changes)
///
/// /weddings                            list, create (owner)
/// /weddings/{id}                       get, update, delete (owner)
/// /weddings/{id}/guests                list (filterable), create
/// /weddings/{id}/groups                list, create
/// /weddings/{id}/tables                list (?group_id), create with seats
/// /weddings/{id}/seating-plan          merged canvas view (?group_id)
///
/// /guests/{id}                         get, update, delete
/// /groups/{id}                         update, delete
///
/// /tables/{id}                         get, update, delete
/// /tables/{id}/position                explicit position + rotation (PUT)
/// /tables/{id}/drop                    canvas drop (POST)
/// /tables/{id}/rotate                  rotate one step (POST)
/// /tables/{id}/group                   assign or clear group (PUT)
/// /tables/{id}/seats                   seats with marker offsets
///
/// /seats/{id}/drop                     guest drop (POST)
/// /seats/{id}/guest                    assign (PUT), vacate (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Weddings and their scoped collections.
        .nest("/weddings", weddings::router())
        .nest("/guests", guests::router())
        .nest("/groups", groups::router())
        // Canvas operations.
        .nest("/tables", tables::router())
        .nest("/seats", seats::router())
}
