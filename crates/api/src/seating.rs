//! Glue between HTTP handlers and the seating planner.
//!
//! Each request that touches tables or seats loads a fresh
//! [`TablePlanner`] for the wedding, lets it check permissions and run the
//! operation, then publishes the confirmed change on the bus.

use wedplan_core::error::CoreError;
use wedplan_core::seating::planner::{PlannerError, TablePlanner};
use wedplan_core::seating::records::{SeatRecord, TableRecord};
use wedplan_core::seating::store::StoreError;
use wedplan_core::types::DbId;
use wedplan_db::repositories::{SeatRepo, SeatingTableRepo};
use wedplan_db::PgSeatingStore;
use wedplan_events::{ChangeEvent, ChangeOp, EntityKind};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub type Planner = TablePlanner<PgSeatingStore>;

/// Load the planner for `wedding_id` on behalf of `user`.
pub async fn open_planner(state: &AppState, user: &AuthUser, wedding_id: DbId) -> AppResult<Planner> {
    TablePlanner::load(
        PgSeatingStore::new(state.pool.clone()),
        user.auth_context(),
        state.translate.clone(),
        wedding_id,
    )
    .await
    .map_err(|e| match e {
        PlannerError::Persistence {
            source: StoreError::NotFound { entity, id },
            ..
        } => AppError::Core(CoreError::NotFound { entity, id }),
        other => AppError::Planner(other),
    })
}

/// Wedding owning a table, or 404.
pub async fn wedding_of_table(state: &AppState, table_id: DbId) -> AppResult<DbId> {
    SeatingTableRepo::find_by_id(&state.pool, table_id)
        .await?
        .map(|t| t.wedding_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Table",
            id: table_id,
        }))
}

/// Wedding owning a seat's table, or 404.
pub async fn wedding_of_seat(state: &AppState, seat_id: DbId) -> AppResult<DbId> {
    SeatRepo::wedding_id_of(&state.pool, seat_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Seat",
            id: seat_id,
        }))
}

/// Publish a change made by `user`.
pub fn publish<T: serde::Serialize>(
    state: &AppState,
    user: &AuthUser,
    entity: EntityKind,
    op: ChangeOp,
    wedding_id: DbId,
    entity_id: DbId,
    record: Option<&T>,
) {
    let mut event = ChangeEvent::new(entity, op, wedding_id, entity_id).with_actor(user.user_id);
    if let Some(record) = record {
        event = event.with_record(record);
    }
    state.change_bus.publish(event);
}

/// Publish the current state of a table from the planner snapshot.
pub fn publish_table(state: &AppState, user: &AuthUser, planner: &Planner, table_id: DbId) {
    let wedding_id = planner.snapshot().wedding_id;
    if let Some(table) = planner.snapshot().table(table_id) {
        publish::<TableRecord>(
            state,
            user,
            EntityKind::Table,
            ChangeOp::Update,
            wedding_id,
            table_id,
            Some(table),
        );
    }
}

/// Publish the current state of each listed seat from the planner snapshot.
pub fn publish_seats(state: &AppState, user: &AuthUser, planner: &Planner, seat_ids: &[DbId]) {
    let wedding_id = planner.snapshot().wedding_id;
    for &seat_id in seat_ids {
        if let Some(seat) = planner.snapshot().seat(seat_id) {
            publish::<SeatRecord>(
                state,
                user,
                EntityKind::Seat,
                ChangeOp::Update,
                wedding_id,
                seat_id,
                Some(seat),
            );
        }
    }
}
