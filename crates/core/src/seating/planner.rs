//! The table planner: coordinator between drop events and the store.
//!
//! Holds the last confirmed [`PlanSnapshot`] for one wedding, checks the
//! edit capability before any store call, and applies a change to the
//! snapshot only after the store has confirmed it. Every failure comes back
//! as a [`PlannerError`] carrying a translated [`Notice`] for the user; none
//! of them leave the planner unusable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::messages::{self, Translate};
use crate::roles::AuthContext;
use crate::seating::assignment::{plan_assignment, AssignmentPlan, DropRejection, SeatState};
use crate::seating::canvas::{
    normalize_rotation, rotate_step, table_drop_position, validate_position, CanvasPoint,
};
use crate::seating::change::{apply_change, ChangeNotice};
use crate::seating::drag::DragPayload;
use crate::seating::records::{PlanSnapshot, TableRecord};
use crate::seating::store::{SeatingStore, StoreError};
use crate::seating::table_spec::NewTable;
use crate::seating::view::{build_view, PlanView};
use crate::types::{DbId, Degrees};

// ---------------------------------------------------------------------------
// Notices and errors
// ---------------------------------------------------------------------------

/// A dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub key: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Rejected before any store call.
    #[error("{}", .0.message)]
    Permission(Notice),

    #[error("{}", .0.message)]
    SeatOccupied(Notice),

    #[error("{}", .0.message)]
    NotFound(Notice),

    #[error("{}: {detail}", .notice.message)]
    Invalid { notice: Notice, detail: String },

    #[error("{}: {source}", .notice.message)]
    Persistence {
        notice: Notice,
        #[source]
        source: StoreError,
    },
}

impl PlannerError {
    pub fn notice(&self) -> &Notice {
        match self {
            PlannerError::Permission(n)
            | PlannerError::SeatOccupied(n)
            | PlannerError::NotFound(n)
            | PlannerError::Invalid { notice: n, .. }
            | PlannerError::Persistence { notice: n, .. } => n,
        }
    }
}

/// Result of a drop event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Assigned(AssignmentPlan),
    Moved { table_id: DbId, position: CanvasPoint },
    /// Payload not understood, or not meant for this target.
    Ignored,
}

// ---------------------------------------------------------------------------
// Saving flag
// ---------------------------------------------------------------------------

/// Shared "a write is in flight" indicator.
#[derive(Debug, Clone, Default)]
pub struct SavingFlag(Arc<AtomicBool>);

impl SavingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn raise(&self) -> SavingGuard {
        self.0.store(true, Ordering::SeqCst);
        SavingGuard(self.0.clone())
    }
}

/// Clears the flag when dropped, whatever path the write took.
struct SavingGuard(Arc<AtomicBool>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

pub struct TablePlanner<S> {
    store: S,
    auth: AuthContext,
    translate: Translate,
    plan: PlanSnapshot,
    saving: SavingFlag,
}

impl<S: SeatingStore> TablePlanner<S> {
    /// Load the arrangement of `wedding_id` and build a planner over it.
    pub async fn load(
        store: S,
        auth: AuthContext,
        translate: Translate,
        wedding_id: DbId,
    ) -> Result<Self, PlannerError> {
        let plan = store.load_plan(wedding_id).await.map_err(|source| {
            PlannerError::Persistence {
                notice: notice(&translate, messages::LOAD_FAILED),
                source,
            }
        })?;
        Ok(Self {
            store,
            auth,
            translate,
            plan,
            saving: SavingFlag::default(),
        })
    }

    /// Replace the snapshot with a fresh load from the store.
    pub async fn reload(&mut self) -> Result<(), PlannerError> {
        let plan = self
            .store
            .load_plan(self.plan.wedding_id)
            .await
            .map_err(|source| PlannerError::Persistence {
                notice: self.notice(messages::LOAD_FAILED),
                source,
            })?;
        self.plan = plan;
        Ok(())
    }

    pub fn snapshot(&self) -> &PlanSnapshot {
        &self.plan
    }

    pub fn view(&self, selected_group: Option<DbId>) -> PlanView {
        build_view(&self.plan, selected_group)
    }

    /// Permission error with the translated notice unless the session may edit tables.
    pub fn require_edit(&self) -> Result<(), PlannerError> {
        if self.auth.can_edit_tables {
            Ok(())
        } else {
            tracing::debug!(user_id = self.auth.user_id, "Table edit without permission");
            Err(PlannerError::Permission(
                self.notice(messages::PERMISSION_DENIED),
            ))
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// Handle to watch the saving indicator from elsewhere.
    pub fn saving_flag(&self) -> SavingFlag {
        self.saving.clone()
    }

    /// Fold a pushed change from another session into the snapshot.
    pub fn apply_change(&mut self, change: ChangeNotice) {
        apply_change(&mut self.plan, change);
    }

    // -- Table controls -----------------------------------------------------

    pub async fn add_table(&mut self, spec: NewTable) -> Result<TableRecord, PlannerError> {
        self.require_edit()?;
        spec.validate().map_err(|e| PlannerError::Invalid {
            notice: self.notice(messages::INVALID_TABLE),
            detail: e.to_string(),
        })?;

        let _saving = self.saving.raise();
        let table = self
            .store
            .create_table(self.plan.wedding_id, &spec)
            .await
            .map_err(|e| self.persistence(e))?;

        tracing::info!(
            table_id = table.id,
            wedding_id = self.plan.wedding_id,
            seats = table.seats.len(),
            "Table added"
        );
        self.plan.tables.push(table.clone());
        Ok(table)
    }

    pub async fn delete_table(&mut self, table_id: DbId) -> Result<(), PlannerError> {
        self.require_edit()?;
        self.require_table(table_id)?;

        let _saving = self.saving.raise();
        self.store
            .delete_table(table_id)
            .await
            .map_err(|e| self.persistence(e))?;

        self.plan.tables.retain(|t| t.id != table_id);
        tracing::info!(table_id, "Table deleted");
        Ok(())
    }

    /// Rotate by one step; returns the new rotation.
    pub async fn rotate_table(&mut self, table_id: DbId) -> Result<Degrees, PlannerError> {
        self.require_edit()?;
        let table = self.require_table(table_id)?;
        let (position, rotation) = (table.position, rotate_step(table.rotation));

        self.write_position(table_id, position, rotation).await?;
        Ok(rotation)
    }

    /// Explicit position and rotation, e.g. from keyboard nudging.
    pub async fn move_table(
        &mut self,
        table_id: DbId,
        position: CanvasPoint,
        rotation: Option<Degrees>,
    ) -> Result<(), PlannerError> {
        self.require_edit()?;
        let table = self.require_table(table_id)?;
        let rotation = rotation.map_or(table.rotation, normalize_rotation);
        validate_position(position).map_err(|detail| PlannerError::Invalid {
            notice: self.notice(messages::INVALID_DROP),
            detail,
        })?;

        self.write_position(table_id, position, rotation).await
    }

    pub async fn assign_group(
        &mut self,
        table_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<(), PlannerError> {
        self.require_edit()?;
        self.require_table(table_id)?;
        if let Some(group) = group_id {
            if self.plan.group(group).is_none() {
                return Err(PlannerError::NotFound(self.notice(messages::GROUP_NOT_FOUND)));
            }
        }

        let _saving = self.saving.raise();
        self.store
            .assign_table_to_group(table_id, group_id)
            .await
            .map_err(|e| self.persistence(e))?;

        if let Some(table) = self.plan.table_mut(table_id) {
            table.group_id = group_id;
        }
        tracing::info!(table_id, group_id, "Table group assigned");
        Ok(())
    }

    // -- Drop handling ------------------------------------------------------

    /// A drag payload was dropped on a seat.
    pub async fn drop_on_seat(
        &mut self,
        seat_id: DbId,
        raw_payload: &str,
    ) -> Result<DropOutcome, PlannerError> {
        let guest_id = match DragPayload::parse(raw_payload) {
            Ok(DragPayload::Guest { guest_id }) => guest_id,
            Ok(DragPayload::Table { .. }) => return Ok(DropOutcome::Ignored),
            Err(e) => {
                tracing::debug!(seat_id, error = %e, "Ignoring drop on seat");
                return Ok(DropOutcome::Ignored);
            }
        };
        self.assign_guest(seat_id, guest_id).await.map(DropOutcome::Assigned)
    }

    /// Seat a guest. Moves the guest if they already sit elsewhere.
    pub async fn assign_guest(
        &mut self,
        seat_id: DbId,
        guest_id: DbId,
    ) -> Result<AssignmentPlan, PlannerError> {
        self.require_edit()?;
        let seat = self
            .plan
            .seat(seat_id)
            .ok_or_else(|| PlannerError::NotFound(self.notice(messages::SEAT_NOT_FOUND)))?;
        if self.plan.guest(guest_id).is_none() {
            return Err(PlannerError::NotFound(self.notice(messages::GUEST_NOT_FOUND)));
        }

        let plan = plan_assignment(
            seat_id,
            SeatState::of(seat.guest_id),
            guest_id,
            self.plan.seat_of_guest(guest_id),
            self.auth.can_edit_tables,
        )
        .map_err(|rejection| self.rejection(rejection))?;

        let _saving = self.saving.raise();
        self.store
            .assign_guest_to_seat(&plan)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    PlannerError::SeatOccupied(self.notice(messages::SEAT_OCCUPIED))
                }
                other => self.persistence(other),
            })?;

        if let Some(previous) = plan.vacate_seat_id.and_then(|id| self.plan.seat_mut(id)) {
            previous.guest_id = None;
        }
        if let Some(seat) = self.plan.seat_mut(seat_id) {
            seat.guest_id = Some(guest_id);
        }
        tracing::info!(
            seat_id,
            guest_id,
            vacated = plan.vacate_seat_id,
            user_id = self.auth.user_id,
            "Guest seated"
        );
        Ok(plan)
    }

    /// Vacate a seat. Returns the guest who was removed, if any.
    ///
    /// A vacant seat is left alone without a store call.
    pub async fn remove_guest(&mut self, seat_id: DbId) -> Result<Option<DbId>, PlannerError> {
        self.require_edit()?;
        let seat = self
            .plan
            .seat(seat_id)
            .ok_or_else(|| PlannerError::NotFound(self.notice(messages::SEAT_NOT_FOUND)))?;
        let Some(guest_id) = seat.guest_id else {
            return Ok(None);
        };

        let _saving = self.saving.raise();
        self.store
            .remove_guest_from_seat(seat_id)
            .await
            .map_err(|e| self.persistence(e))?;

        if let Some(seat) = self.plan.seat_mut(seat_id) {
            seat.guest_id = None;
        }
        tracing::info!(seat_id, guest_id, "Guest removed from seat");
        Ok(Some(guest_id))
    }

    /// A drag payload was dropped on the empty canvas.
    ///
    /// `pointer` and `canvas_origin` are viewport pixels; the drag offset
    /// comes from the payload.
    pub async fn drop_on_canvas(
        &mut self,
        raw_payload: &str,
        pointer: CanvasPoint,
        canvas_origin: CanvasPoint,
        zoom: f64,
    ) -> Result<DropOutcome, PlannerError> {
        let payload = match DragPayload::parse(raw_payload) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring drop on canvas");
                return Ok(DropOutcome::Ignored);
            }
        };
        let (DragPayload::Table { table_id, .. }, Some(drag)) = (&payload, payload.drag_origin())
        else {
            return Ok(DropOutcome::Ignored);
        };
        let table_id = *table_id;

        self.require_edit()?;
        let rotation = self.require_table(table_id)?.rotation;
        let position = table_drop_position(pointer, canvas_origin, drag, zoom).map_err(
            |detail| PlannerError::Invalid {
                notice: self.notice(messages::INVALID_DROP),
                detail,
            },
        )?;

        self.write_position(table_id, position, rotation).await?;
        Ok(DropOutcome::Moved { table_id, position })
    }

    // -- Internals ----------------------------------------------------------

    async fn write_position(
        &mut self,
        table_id: DbId,
        position: CanvasPoint,
        rotation: Degrees,
    ) -> Result<(), PlannerError> {
        let _saving = self.saving.raise();
        self.store
            .update_table_position(table_id, position, rotation)
            .await
            .map_err(|e| self.persistence(e))?;

        if let Some(table) = self.plan.table_mut(table_id) {
            table.position = position;
            table.rotation = rotation;
        }
        tracing::info!(
            table_id,
            x = position.x,
            y = position.y,
            rotation,
            "Table position saved"
        );
        Ok(())
    }

    fn require_table(&self, table_id: DbId) -> Result<&TableRecord, PlannerError> {
        self.plan
            .table(table_id)
            .ok_or_else(|| PlannerError::NotFound(self.notice(messages::TABLE_NOT_FOUND)))
    }

    fn rejection(&self, rejection: DropRejection) -> PlannerError {
        match rejection {
            DropRejection::PermissionDenied => {
                PlannerError::Permission(self.notice(messages::PERMISSION_DENIED))
            }
            DropRejection::SeatOccupied { .. } => {
                PlannerError::SeatOccupied(self.notice(messages::SEAT_OCCUPIED))
            }
        }
    }

    fn persistence(&self, source: StoreError) -> PlannerError {
        tracing::warn!(error = %source, "Seating write failed");
        PlannerError::Persistence {
            notice: self.notice(messages::SAVE_FAILED),
            source,
        }
    }

    fn notice(&self, key: &'static str) -> Notice {
        notice(&self.translate, key)
    }
}

fn notice(translate: &Translate, key: &'static str) -> Notice {
    Notice {
        key,
        message: translate(key),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
