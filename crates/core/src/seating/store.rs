//! The persistence capability the seating coordinator depends on.
//!
//! Implemented over PostgreSQL by `wedplan-db::PgSeatingStore`; tests use an
//! in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;

use crate::seating::assignment::AssignmentPlan;
use crate::seating::canvas::CanvasPoint;
use crate::seating::records::{PlanSnapshot, TableRecord};
use crate::seating::table_spec::NewTable;
use crate::types::{DbId, Degrees};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The write lost a race or broke a uniqueness rule.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SeatingStore: Send + Sync {
    /// Tables (with seats), guests and groups of one wedding.
    async fn load_plan(&self, wedding_id: DbId) -> Result<PlanSnapshot, StoreError>;

    /// Create a table and its `capacity` seats in one write.
    async fn create_table(
        &self,
        wedding_id: DbId,
        spec: &NewTable,
    ) -> Result<TableRecord, StoreError>;

    /// Persist position and rotation together.
    async fn update_table_position(
        &self,
        table_id: DbId,
        position: CanvasPoint,
        rotation: Degrees,
    ) -> Result<(), StoreError>;

    /// Seat the guest, vacating `plan.vacate_seat_id` in the same write.
    ///
    /// Must fail with [`StoreError::Conflict`] if the target seat is no
    /// longer vacant.
    async fn assign_guest_to_seat(&self, plan: &AssignmentPlan) -> Result<(), StoreError>;

    async fn remove_guest_from_seat(&self, seat_id: DbId) -> Result<(), StoreError>;

    /// Delete a table; its seats go with it.
    async fn delete_table(&self, table_id: DbId) -> Result<(), StoreError>;

    async fn assign_table_to_group(
        &self,
        table_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: SeatingStore + ?Sized> SeatingStore for Arc<T> {
    async fn load_plan(&self, wedding_id: DbId) -> Result<PlanSnapshot, StoreError> {
        (**self).load_plan(wedding_id).await
    }

    async fn create_table(
        &self,
        wedding_id: DbId,
        spec: &NewTable,
    ) -> Result<TableRecord, StoreError> {
        (**self).create_table(wedding_id, spec).await
    }

    async fn update_table_position(
        &self,
        table_id: DbId,
        position: CanvasPoint,
        rotation: Degrees,
    ) -> Result<(), StoreError> {
        (**self)
            .update_table_position(table_id, position, rotation)
            .await
    }

    async fn assign_guest_to_seat(&self, plan: &AssignmentPlan) -> Result<(), StoreError> {
        (**self).assign_guest_to_seat(plan).await
    }

    async fn remove_guest_from_seat(&self, seat_id: DbId) -> Result<(), StoreError> {
        (**self).remove_guest_from_seat(seat_id).await
    }

    async fn delete_table(&self, table_id: DbId) -> Result<(), StoreError> {
        (**self).delete_table(table_id).await
    }

    async fn assign_table_to_group(
        &self,
        table_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<(), StoreError> {
        (**self).assign_table_to_group(table_id, group_id).await
    }
}
