//! PostgreSQL implementation of the seating persistence capability.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use wedplan_core::error::CoreError;
use wedplan_core::seating::assignment::AssignmentPlan;
use wedplan_core::seating::canvas::CanvasPoint;
use wedplan_core::seating::records::{GroupRecord, GuestRecord, PlanSnapshot, TableRecord};
use wedplan_core::seating::store::{SeatingStore, StoreError};
use wedplan_core::seating::table_spec::NewTable;
use wedplan_core::types::{DbId, Degrees};

use crate::models::seat::Seat;
use crate::repositories::seat_repo::SeatAssignment;
use crate::repositories::{GuestRepo, SeatRepo, SeatingTableRepo, TableGroupRepo, WeddingRepo};

/// Unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// [`SeatingStore`] over a connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgSeatingStore {
    pool: PgPool,
}

impl PgSeatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a database error onto the store's error kinds.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

fn corrupt(err: CoreError) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl SeatingStore for PgSeatingStore {
    async fn load_plan(&self, wedding_id: DbId) -> Result<PlanSnapshot, StoreError> {
        let pool = &self.pool;
        WeddingRepo::find_by_id(pool, wedding_id)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::NotFound { entity: "Wedding", id: wedding_id })?;

        let tables = SeatingTableRepo::list_by_wedding(pool, wedding_id, None)
            .await
            .map_err(store_error)?;
        let seats = SeatRepo::list_by_wedding(pool, wedding_id)
            .await
            .map_err(store_error)?;
        let guests = GuestRepo::list_by_wedding(pool, wedding_id)
            .await
            .map_err(store_error)?;
        let groups = TableGroupRepo::list_by_wedding(pool, wedding_id)
            .await
            .map_err(store_error)?;

        let mut seats_by_table: HashMap<DbId, Vec<Seat>> = HashMap::new();
        for seat in seats {
            seats_by_table.entry(seat.table_id).or_default().push(seat);
        }

        let tables = tables
            .into_iter()
            .map(|t| {
                let seats = seats_by_table.remove(&t.id).unwrap_or_default();
                t.into_record(seats)
            })
            .collect::<Result<Vec<TableRecord>, _>>()
            .map_err(corrupt)?;
        let guests = guests
            .into_iter()
            .map(GuestRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt)?;
        let groups = groups
            .into_iter()
            .map(GroupRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt)?;

        Ok(PlanSnapshot {
            wedding_id,
            tables,
            guests,
            groups,
        })
    }

    async fn create_table(
        &self,
        wedding_id: DbId,
        spec: &NewTable,
    ) -> Result<TableRecord, StoreError> {
        let (table, seats) = SeatingTableRepo::create_with_seats(&self.pool, wedding_id, spec)
            .await
            .map_err(store_error)?;
        table.into_record(seats).map_err(corrupt)
    }

    async fn update_table_position(
        &self,
        table_id: DbId,
        position: CanvasPoint,
        rotation: Degrees,
    ) -> Result<(), StoreError> {
        SeatingTableRepo::update_position(&self.pool, table_id, position, rotation)
            .await
            .map_err(store_error)?
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: "Table", id: table_id })
    }

    async fn assign_guest_to_seat(&self, plan: &AssignmentPlan) -> Result<(), StoreError> {
        match SeatRepo::assign_guest(&self.pool, plan.seat_id, plan.guest_id)
            .await
            .map_err(store_error)?
        {
            SeatAssignment::Assigned { .. } => Ok(()),
            SeatAssignment::Occupied => Err(StoreError::Conflict(format!(
                "Seat {} is already occupied",
                plan.seat_id
            ))),
            SeatAssignment::NotFound => Err(StoreError::NotFound {
                entity: "Seat",
                id: plan.seat_id,
            }),
        }
    }

    async fn remove_guest_from_seat(&self, seat_id: DbId) -> Result<(), StoreError> {
        SeatRepo::remove_guest(&self.pool, seat_id)
            .await
            .map_err(store_error)?
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: "Seat", id: seat_id })
    }

    async fn delete_table(&self, table_id: DbId) -> Result<(), StoreError> {
        if SeatingTableRepo::delete(&self.pool, table_id)
            .await
            .map_err(store_error)?
        {
            Ok(())
        } else {
            Err(StoreError::NotFound { entity: "Table", id: table_id })
        }
    }

    async fn assign_table_to_group(
        &self,
        table_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<(), StoreError> {
        SeatingTableRepo::set_group(&self.pool, table_id, group_id)
            .await
            .map_err(store_error)?
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: "Table", id: table_id })
    }
}
